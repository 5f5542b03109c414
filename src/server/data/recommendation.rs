use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr, EntityTrait, QueryOrder};
use uuid::Uuid;

use crate::server::util::time::now;

/// Link and banner image of a recommended site.
#[derive(Debug, Clone)]
pub struct RecommendationDetails {
    pub recommendation_link: String,
    pub recommendation_title: String,
    pub image_link: String,
    pub image_title: String,
}

pub struct RecommendationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RecommendationRepository<'a, C> {
    /// Creates a new instance of [`RecommendationRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        details: RecommendationDetails,
    ) -> Result<entity::recommendation::Model, DbErr> {
        entity::recommendation::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            recommendation_link: ActiveValue::Set(details.recommendation_link),
            recommendation_title: ActiveValue::Set(details.recommendation_title),
            image_link: ActiveValue::Set(details.image_link),
            image_title: ActiveValue::Set(details.image_title),
            created_at: ActiveValue::Set(now()),
        }
        .insert(self.db)
        .await
    }

    /// Gets all recommendations, newest first
    pub async fn get_all(&self) -> Result<Vec<entity::recommendation::Model>, DbErr> {
        entity::prelude::Recommendation::find()
            .order_by_desc(entity::recommendation::Column::CreatedAt)
            .all(self.db)
            .await
    }
}
