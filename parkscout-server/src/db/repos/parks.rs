//! Park repository - proximity listings, spot info, and the free-spot
//! update.

use serde::Serialize;
use sqlx::{FromRow, PgPool};

/// Park row for the nearby listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NearbyPark {
    /// GeoJSON rendering of the stored geometry.
    pub geo: String,
    pub nfreespots: i32,
    /// Occupancy percentage, 0-100.
    pub ocupado: i32,
    /// Kilometers from the query point, meter precision.
    pub dist: f64,
}

/// Spot counts for a single park.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ParkInfo {
    pub nspots: i32,
    pub nfreespots: i32,
}

/// Park repository
pub struct ParkRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ParkRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Up to 8 parks with free spots, nearest first.
    ///
    /// The numeric cast keeps the occupancy division exact over integer
    /// columns.
    pub async fn nearby(&self, lat: f64, long: f64) -> Result<Vec<NearbyPark>, sqlx::Error> {
        sqlx::query_as::<_, NearbyPark>(
            r#"
            SELECT st_asgeojson(geo) AS geo,
                   nfreespots,
                   ROUND(100 - (nfreespots::numeric / nspots) * 100)::int AS ocupado,
                   ROUND(st_distance(ST_SetSRID(ST_Point($1, $2), 4326)::geography, geo::geography)) / 1000 AS dist
            FROM park
            WHERE nfreespots <> 0
            ORDER BY dist ASC
            LIMIT 8
            "#,
        )
        .bind(long)
        .bind(lat)
        .fetch_all(self.pool)
        .await
    }

    /// Same listing, restricted to parks farther than `min_dist` km.
    pub async fn nearby_beyond(
        &self,
        lat: f64,
        long: f64,
        min_dist: f64,
    ) -> Result<Vec<NearbyPark>, sqlx::Error> {
        sqlx::query_as::<_, NearbyPark>(
            r#"
            SELECT st_asgeojson(geo) AS geo,
                   nfreespots,
                   ROUND(100 - (nfreespots::numeric / nspots) * 100)::int AS ocupado,
                   ROUND(st_distance(ST_SetSRID(ST_Point($1, $2), 4326)::geography, geo::geography)) / 1000 AS dist
            FROM park
            WHERE nfreespots <> 0
              AND ROUND(st_distance(ST_SetSRID(ST_Point($1, $2), 4326)::geography, geo::geography)) / 1000 > $3
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

    /// Spot counts for one park. Zero rows is a valid result, not an
    /// error.
    pub async fn info(&self, id: i32) -> Result<Vec<ParkInfo>, sqlx::Error> {
        sqlx::query_as::<_, ParkInfo>("SELECT nspots, nfreespots FROM park WHERE id = $1")
            .bind(id)
            .fetch_all(self.pool)
            .await
    }

    /// Set the free-spot count for one park.
    pub async fn set_free_spots(&self, id: i32, nfreespots: i32) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE park SET nfreespots = $1 WHERE id = $2")
            .bind(nfreespots)
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DbSettings, LocalConfig};
    use crate::db::create_pool;

    // Integration tests require a PostGIS database seeded with the
    // park table. Run with: DB_HOST=... cargo test -p parkscout-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn nearby_is_limited_and_ordered() {
        let pool = create_pool(&DbSettings::from_env(&LocalConfig::default()));
        let parks = ParkRepo::new(&pool)
            .nearby(38.736946, -9.142685)
            .await
            .expect("query failed");

        assert!(parks.len() <= 8);
        assert!(parks.iter().all(|p| p.nfreespots != 0));
        assert!(parks.windows(2).all(|w| w[0].dist <= w[1].dist));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn nearby_beyond_excludes_close_parks() {
        let pool = create_pool(&DbSettings::from_env(&LocalConfig::default()));
        let parks = ParkRepo::new(&pool)
            .nearby_beyond(38.736946, -9.142685, 2.0)
            .await
            .expect("query failed");

        assert!(parks.iter().all(|p| p.dist > 2.0));
        assert!(parks.windows(2).all(|w| w[0].dist <= w[1].dist));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_then_read_round_trips() {
        let pool = create_pool(&DbSettings::from_env(&LocalConfig::default()));
        let repo = ParkRepo::new(&pool);

        repo.set_free_spots(5, 12).await.expect("update failed");
        let info = repo.info(5).await.expect("read failed");

        assert_eq!(info.len(), 1);
        assert_eq!(info[0].nfreespots, 12);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn info_for_unknown_id_is_empty() {
        let pool = create_pool(&DbSettings::from_env(&LocalConfig::default()));
        let info = ParkRepo::new(&pool)
            .info(i32::MAX)
            .await
            .expect("query failed");

        assert!(info.is_empty());
    }
}
