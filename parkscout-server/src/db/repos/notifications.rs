//! Notification repository - active notifications joined to their
//! place.
//!
//! These queries select `*` across the join, so the column set follows
//! the schema and rows are serialized generically (`db::rows`).

use serde_json::Value;
use sqlx::PgPool;

use crate::db::rows::rows_to_json;

/// Notification repository
pub struct NotificationRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> NotificationRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Up to 8 active notifications (end date today or later), nearest
    /// place first, with a computed `dist` column.
    pub async fn nearby_active(&self, lat: f64, long: f64) -> Result<Vec<Value>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT *,
                   ROUND(st_distance(ST_SetSRID(ST_Point($1, $2), 4326)::geography, p.geo::geography)) / 1000 AS dist
            FROM place AS p
            JOIN notification AS n ON n.idplace = p.id
            WHERE CURRENT_DATE <= n.date_end
            ORDER BY dist ASC
            LIMIT 8
            "#,
        )
        .bind(long)
        .bind(lat)
        .fetch_all(self.pool)
        .await?;

        rows_to_json(&rows)
    }

    /// Same join and date filter, restricted to places farther than
    /// `min_dist` km. No `dist` column in the result; clients of this
    /// variant never read one.
    pub async fn nearby_active_beyond(
        &self,
        lat: f64,
        long: f64,
        min_dist: f64,
    ) -> Result<Vec<Value>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT *
            FROM place AS p
            JOIN notification AS n ON n.idplace = p.id
            WHERE ROUND(st_distance(ST_SetSRID(ST_Point($1, $2), 4326)::geography, p.geo::geography)) / 1000 > $3
              AND CURRENT_DATE <= n.date_end
            ORDER BY ROUND(st_distance(ST_SetSRID(ST_Point($1, $2), 4326)::geography, p.geo::geography)) / 1000 ASC
            LIMIT 8
            "#,
        )
        .bind(long)
        .bind(lat)
        .bind(min_dist)
        .fetch_all(self.pool)
        .await?;

        rows_to_json(&rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DbSettings, LocalConfig};
    use crate::db::create_pool;
    use chrono::Utc;

    // Integration tests require a PostGIS database seeded with the
    // place and notification tables.
    // Run with: DB_HOST=... cargo test -p parkscout-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn nearby_active_excludes_expired() {
        let pool = create_pool(&DbSettings::from_env(&LocalConfig::default()));
        let notifs = NotificationRepo::new(&pool)
            .nearby_active(38.736946, -9.142685)
            .await
            .expect("query failed");

        assert!(notifs.len() <= 8);
        let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();
        for notif in &notifs {
            let date_end = notif["date_end"].as_str().expect("date_end column");
            assert!(date_end >= today.as_str());
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn nearby_active_beyond_has_no_dist_column() {
        let pool = create_pool(&DbSettings::from_env(&LocalConfig::default()));
        let notifs = NotificationRepo::new(&pool)
            .nearby_active_beyond(38.736946, -9.142685, 1.0)
            .await
            .expect("query failed");

        for notif in &notifs {
            assert!(notif.get("dist").is_none());
        }
    }
}
