use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

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
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "contact_type")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContactType {
    #[default]
    #[sea_orm(string_value = "inquiry")]
    Inquiry,
    #[sea_orm(string_value = "support")]
    Support,
    #[sea_orm(string_value = "complaint")]
    Complaint,
    #[sea_orm(string_value = "feedback")]
    Feedback,
}

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
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "contact_status")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ContactStatus {
    #[default]
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "resolved")]
    Resolved,
    #[sea_orm(string_value = "closed")]
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    #[serde(rename = "type")]
    pub contact_type: ContactType,
    pub status: ContactStatus,
    /// Written by an admin while triaging
    pub response: Option<String>,
    /// Set when the sender was signed in
    pub user_id: Option<Uuid>,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    /// New submissions always start as `pending`
    pub fn new(user_id: Option<Uuid>, input: CreateContact) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            email: input.email,
            phone: input.phone,
            subject: input.subject,
            message: input.message,
            contact_type: input.contact_type,
            status: ContactStatus::Pending,
            response: None,
            user_id,
            submitted_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: UpdateContact) {
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(response) = update.response {
            self.response = Some(response);
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateContact {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub subject: String,
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
    #[serde(rename = "type", default)]
    pub contact_type: ContactType,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateContact {
    pub status: Option<ContactStatus>,
    #[validate(length(min = 1, max = 5000))]
    pub response: Option<String>,
}
