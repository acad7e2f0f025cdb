//! Query repositories, one per resource
//!
//! Each repository borrows the shared pool and runs fixed statements
//! with bound parameters. Distance math lives entirely in SQL; the
//! query point is always built longitude-first with SRID 4326.

pub mod notifications;
pub mod parks;
pub mod places;

pub use notifications::NotificationRepo;
pub use parks::{NearbyPark, ParkInfo, ParkRepo};
pub use places::{Category, NearbyPlace, PlaceRepo};
