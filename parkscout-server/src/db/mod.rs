//! Database layer - connection provisioning and query repositories
//!
//! # Design Principles
//!
//! - One lazily-connected pool per process, injected through `AppState`
//! - Every endpoint runs exactly one statement, always with bound
//!   parameters
//! - No transactions: each query is a single read or a single write

pub mod pool;
pub mod repos;
pub mod rows;

pub use pool::create_pool;
pub use repos::*;
