use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Payment lifecycle.
///
/// - `pending` to `completed` or `failed`
/// - `failed` back to `pending` for a retry
/// - `completed` to `refunded`
///
/// `refunded` is terminal.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_status")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "failed")]
    Failed,
    #[sea_orm(string_value = "refunded")]
    Refunded,
}

impl PaymentStatus {
    pub fn is_terminal(self) -> bool {
        self == Self::Refunded
    }

    pub fn can_transition_to(self, next: Self) -> bool {
        use PaymentStatus::*;

        self == next
            || matches!(
                (self, next),
                (Pending, Completed | Failed) | (Failed, Pending) | (Completed, Refunded)
            )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Payment {
    pub id: Uuid,
    pub order_id: Uuid,
    pub user_id: Uuid,
    pub amount: f64,
    pub method: String,
    pub status: PaymentStatus,
    /// Set once, on the first move into `completed`
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    pub fn new(user_id: Uuid, input: CreatePayment) -> Self {
        let now = Utc::now();
        let mut payment = Self {
            id: Uuid::now_v7(),
            order_id: input.order_id,
            user_id,
            amount: input.amount,
            method: input.method,
            status: input.status,
            paid_at: None,
            created_at: now,
            updated_at: now,
        };
        payment.stamp(now);
        payment
    }

    /// Apply an already validated update
    pub fn apply_update(&mut self, update: UpdatePayment) {
        let now = Utc::now();
        if let Some(amount) = update.amount {
            self.amount = amount;
        }
        if let Some(method) = update.method {
            self.method = method;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        self.stamp(now);
        self.updated_at = now;
    }

    fn stamp(&mut self, now: DateTime<Utc>) {
        if self.status == PaymentStatus::Completed && self.paid_at.is_none() {
            self.paid_at = Some(now);
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePayment {
    pub order_id: Uuid,
    #[validate(range(exclusive_min = 0.0))]
    pub amount: f64,
    #[validate(length(min = 1, max = 100))]
    pub method: String,
    #[serde(default)]
    pub status: PaymentStatus,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdatePayment {
    #[validate(range(exclusive_min = 0.0))]
    pub amount: Option<f64>,
    #[validate(length(min = 1, max = 100))]
    pub method: Option<String>,
    pub status: Option<PaymentStatus>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaymentFilter {
    /// Only payments for this order
    #[serde(alias = "orderId")]
    pub order_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(status: PaymentStatus) -> CreatePayment {
        CreatePayment {
            order_id: Uuid::now_v7(),
            amount: 99.5,
            method: "credit_card".to_string(),
            status,
        }
    }

    #[test]
    fn test_transitions() {
        use PaymentStatus::*;

        assert!(Pending.can_transition_to(Completed));
        assert!(Pending.can_transition_to(Failed));
        assert!(Failed.can_transition_to(Pending));
        assert!(Completed.can_transition_to(Refunded));
        assert!(Completed.can_transition_to(Completed));

        assert!(!Completed.can_transition_to(Pending));
        assert!(!Failed.can_transition_to(Completed));
        assert!(!Refunded.can_transition_to(Pending));
        assert!(Refunded.is_terminal());
    }

    #[test]
    fn test_completed_on_creation_is_stamped() {
        let completed = Payment::new(Uuid::now_v7(), create(PaymentStatus::Completed));
        assert!(completed.paid_at.is_some());

        let pending = Payment::new(Uuid::now_v7(), create(PaymentStatus::Pending));
        assert!(pending.paid_at.is_none());
    }

    #[test]
    fn test_paid_at_is_set_once() {
        let mut payment = Payment::new(Uuid::now_v7(), create(PaymentStatus::Pending));

        payment.apply_update(UpdatePayment {
            status: Some(PaymentStatus::Completed),
            ..Default::default()
        });
        let paid_at = payment.paid_at;
        assert!(paid_at.is_some());

        payment.apply_update(UpdatePayment {
            status: Some(PaymentStatus::Completed),
            method: Some("paypal".to_string()),
            ..Default::default()
        });
        assert_eq!(payment.paid_at, paid_at);
        assert_eq!(payment.method, "paypal");
    }

    #[test]
    fn test_amount_must_be_positive() {
        let mut input = create(PaymentStatus::Pending);
        input.amount = 0.0;
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_filter_accepts_camel_case_alias() {
        let id = Uuid::now_v7();
        let filter: PaymentFilter =
            serde_json::from_value(serde_json::json!({ "orderId": id })).unwrap();
        assert_eq!(filter.order_id, Some(id));
    }
}
