use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ContactResult;
use crate::models::Contact;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn create(&self, contact: Contact) -> ContactResult<Contact>;

    async fn get_by_id(&self, id: Uuid) -> ContactResult<Option<Contact>>;

    /// Most recent submission first
    async fn list(&self) -> ContactResult<Vec<Contact>>;

    async fn list_by_user(&self, user_id: Uuid) -> ContactResult<Vec<Contact>>;

    async fn update(&self, contact: Contact) -> ContactResult<Contact>;

    async fn delete(&self, id: Uuid) -> ContactResult<bool>;
}
