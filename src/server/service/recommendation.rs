use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::recommendation::{RecommendationDetails, RecommendationRepository},
    error::Error,
};

pub struct RecommendationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RecommendationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a recommended site. Inputs are expected to be validated and trimmed.
    pub async fn recommend(
        &self,
        details: RecommendationDetails,
    ) -> Result<entity::recommendation::Model, Error> {
        let txn = self.db.begin().await?;

        let recommendation = RecommendationRepository::new(&txn).create(details).await?;

        txn.commit().await?;

        tracing::info!(
            "Recommendation registered: {}",
            recommendation.recommendation_title
        );

        Ok(recommendation)
    }
}
