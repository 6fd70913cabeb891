use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Review {
    pub id: Uuid,
    pub product_id: Uuid,
    pub user_id: Uuid,
    /// 1 to 5
    pub rating: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn new(user_id: Uuid, input: CreateReview) -> Self {
        Self {
            id: Uuid::now_v7(),
            product_id: input.product_id,
            user_id,
            rating: input.rating,
            comment: input.comment,
            created_at: Utc::now(),
        }
    }

    pub fn apply_update(&mut self, update: UpdateReview) {
        if let Some(rating) = update.rating {
            self.rating = rating;
        }
        if let Some(comment) = update.comment {
            self.comment = Some(comment);
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateReview {
    pub product_id: Uuid,
    #[validate(range(min = 1, max = 5))]
    pub rating: i16,
    #[validate(length(max = 2000))]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateReview {
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i16>,
    #[validate(length(max = 2000))]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReviewFilter {
    /// Only reviews of this product
    #[serde(alias = "productId")]
    pub product_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        let mut input = CreateReview {
            product_id: Uuid::now_v7(),
            rating: 5,
            comment: None,
        };
        assert!(input.validate().is_ok());

        input.rating = 0;
        assert!(input.validate().is_err());

        input.rating = 6;
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_update_keeps_unset_fields() {
        let mut review = Review::new(
            Uuid::now_v7(),
            CreateReview {
                product_id: Uuid::now_v7(),
                rating: 4,
                comment: Some("Solid".to_string()),
            },
        );

        review.apply_update(UpdateReview {
            rating: Some(2),
            comment: None,
        });

        assert_eq!(review.rating, 2);
        assert_eq!(review.comment.as_deref(), Some("Solid"));
    }
}
