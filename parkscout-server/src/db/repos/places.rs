//! Place repository - category listing and proximity queries.

use serde::Serialize;
use sqlx::{FromRow, PgPool};

/// One distinct category value. DISTINCT can surface NULL.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub category: Option<String>,
}

/// Place row for the nearby listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NearbyPlace {
    /// GeoJSON rendering of the stored geometry.
    pub geo: String,
    pub name: String,
    pub about: Option<String>,
    pub category: Option<String>,
    pub photo_path: Option<String>,
    pub id: i32,
    /// Kilometers from the query point, meter precision.
    pub dist: f64,
}

/// Place repository
pub struct PlaceRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PlaceRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Distinct category values across all places.
    pub async fn categories(&self) -> Result<Vec<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>("SELECT DISTINCT(category) FROM place")
            .fetch_all(self.pool)
            .await
    }

    /// Up to 8 places of any category, nearest first.
    pub async fn nearby(&self, lat: f64, long: f64) -> Result<Vec<NearbyPlace>, sqlx::Error> {
        sqlx::query_as::<_, NearbyPlace>(
            r#"
            SELECT st_asgeojson(geo) AS geo,
                   name,
                   about,
                   category,
                   photo_path,
                   id,
                   ROUND(st_distance(ST_SetSRID(ST_Point($1, $2), 4326)::geography, geo::geography)) / 1000 AS dist
            FROM place
            ORDER BY dist ASC
            LIMIT 8
            "#,
        )
        .bind(long)
        .bind(lat)
        .fetch_all(self.pool)
        .await
    }

    /// Same listing, restricted to places farther than `min_dist` km.
    pub async fn nearby_beyond(
        &self,
        lat: f64,
        long: f64,
        min_dist: f64,
    ) -> Result<Vec<NearbyPlace>, sqlx::Error> {
        sqlx::query_as::<_, NearbyPlace>(
            r#"
            SELECT st_asgeojson(geo) AS geo,
                   name,
                   about,
                   category,
                   photo_path,
                   id,
                   ROUND(st_distance(ST_SetSRID(ST_Point($1, $2), 4326)::geography, geo::geography)) / 1000 AS dist
            FROM place
            WHERE ROUND(st_distance(ST_SetSRID(ST_Point($1, $2), 4326)::geography, geo::geography)) / 1000 > $3
            ORDER BY dist ASC
            LIMIT 8
            "#,
        )
        .bind(long)
        .bind(lat)
        .bind(min_dist)
        .fetch_all(self.pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DbSettings, LocalConfig};
    use crate::db::create_pool;

    // Integration tests require a PostGIS database seeded with the
    // place table. Run with: DB_HOST=... cargo test -p parkscout-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn nearby_is_limited_and_ordered() {
        let pool = create_pool(&DbSettings::from_env(&LocalConfig::default()));
        let places = PlaceRepo::new(&pool)
            .nearby(38.736946, -9.142685)
            .await
            .expect("query failed");

        assert!(places.len() <= 8);
        assert!(places.windows(2).all(|w| w[0].dist <= w[1].dist));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn nearby_beyond_filters_by_distance() {
        let pool = create_pool(&DbSettings::from_env(&LocalConfig::default()));
        let places = PlaceRepo::new(&pool)
            .nearby_beyond(38.736946, -9.142685, 5.0)
            .await
            .expect("query failed");

        assert!(places.iter().all(|p| p.dist > 5.0));
        assert!(places.windows(2).all(|w| w[0].dist <= w[1].dist));
    }
}
