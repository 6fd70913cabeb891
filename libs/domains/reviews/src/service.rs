use axum_helpers::Principal;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ReviewError, ReviewResult};
use crate::models::{CreateReview, Review, ReviewFilter, UpdateReview};
use crate::repository::ReviewRepository;

pub struct ReviewService<R: ReviewRepository> {
    repository: Arc<R>,
}

impl<R: ReviewRepository> ReviewService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(user_id = %principal.id, product_id = %input.product_id))]
    pub async fn create(&self, principal: Principal, input: CreateReview) -> ReviewResult<Review> {
        if !self.repository.product_exists(input.product_id).await? {
            return Err(ReviewError::ProductNotFound(input.product_id));
        }

        if self
            .repository
            .has_reviewed(principal.id, input.product_id)
            .await?
        {
            return Err(ReviewError::AlreadyReviewed);
        }

        self.repository
            .create(Review::new(principal.id, input))
            .await
    }

    pub async fn list(&self, filter: ReviewFilter) -> ReviewResult<Vec<Review>> {
        self.repository.list(filter.product_id).await
    }

    pub async fn my_reviews(&self, principal: Principal) -> ReviewResult<Vec<Review>> {
        self.repository.list_by_user(principal.id).await
    }

    pub async fn get(&self, id: Uuid) -> ReviewResult<Review> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ReviewError::NotFound(id))
    }

    async fn get_own(&self, principal: Principal, id: Uuid) -> ReviewResult<Review> {
        self.repository
            .get_by_id(id)
            .await?
            .filter(|review| review.user_id == principal.id)
            .ok_or(ReviewError::NotFound(id))
    }

    #[instrument(skip(self, input), fields(review_id = %id))]
    pub async fn update(
        &self,
        principal: Principal,
        id: Uuid,
        input: UpdateReview,
    ) -> ReviewResult<Review> {
        let mut review = self.get_own(principal, id).await?;
        review.apply_update(input);
        self.repository.update(review).await
    }

    #[instrument(skip(self), fields(review_id = %id))]
    pub async fn delete(&self, principal: Principal, id: Uuid) -> ReviewResult<()> {
        self.get_own(principal, id).await?;

        if !self.repository.delete(id).await? {
            return Err(ReviewError::NotFound(id));
        }
        Ok(())
    }
}
