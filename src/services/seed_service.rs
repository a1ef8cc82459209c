use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::info;

use crate::database::seed_data::{self, SeedSummary};
use crate::errors::CatalogResult;
use crate::services::rating_service::recompute_average;

#[derive(Clone)]
pub struct SeedService {
    db: DatabaseConnection,
}

impl SeedService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Replaces the whole catalog with the sample data set.
    ///
    /// Runs in a single transaction, so a failure leaves the previous
    /// catalog in place.
    pub async fn seed(&self) -> CatalogResult<SeedSummary> {
        let txn = self.db.begin().await?;

        seed_data::clear_catalog(&txn).await?;
        let (movie_ids, summary) = seed_data::insert_sample_catalog(&txn).await?;
        for movie_id in movie_ids {
            recompute_average(&txn, movie_id).await?;
        }

        txn.commit().await?;

        info!("Database seeded successfully");
        Ok(summary)
    }
}
