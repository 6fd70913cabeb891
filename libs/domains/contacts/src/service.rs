use axum_helpers::Principal;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ContactError, ContactResult};
use crate::models::{Contact, CreateContact, UpdateContact};
use crate::repository::ContactRepository;

pub struct ContactService<R: ContactRepository> {
    repository: Arc<R>,
}

impl<R: ContactRepository> ContactService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Anonymous submissions are accepted
    #[instrument(skip(self, input), fields(signed_in = principal.is_some()))]
    pub async fn submit(
        &self,
        principal: Option<Principal>,
        input: CreateContact,
    ) -> ContactResult<Contact> {
        let user_id = principal.map(|p| p.id);
        self.repository.create(Contact::new(user_id, input)).await
    }

    pub async fn list(&self, principal: Principal) -> ContactResult<Vec<Contact>> {
        principal.require_admin()?;
        self.repository.list().await
    }

    pub async fn my_contacts(&self, principal: Principal) -> ContactResult<Vec<Contact>> {
        self.repository.list_by_user(principal.id).await
    }

    pub async fn get(&self, principal: Principal, id: Uuid) -> ContactResult<Contact> {
        principal.require_admin()?;
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ContactError::NotFound(id))
    }

    #[instrument(skip(self, input), fields(contact_id = %id))]
    pub async fn update(
        &self,
        principal: Principal,
        id: Uuid,
        input: UpdateContact,
    ) -> ContactResult<Contact> {
        let mut contact = self.get(principal, id).await?;
        contact.apply_update(input);
        self.repository.update(contact).await
    }

    #[instrument(skip(self), fields(contact_id = %id))]
    pub async fn delete(&self, principal: Principal, id: Uuid) -> ContactResult<()> {
        principal.require_admin()?;

        if !self.repository.delete(id).await? {
            return Err(ContactError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContactStatus, ContactType};
    use crate::repository::MockContactRepository;

    fn input() -> CreateContact {
        CreateContact {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: None,
            subject: "Broken handle".to_string(),
            message: "The mug arrived with a broken handle.".to_string(),
            contact_type: ContactType::Complaint,
        }
    }

    #[tokio::test]
    async fn test_anonymous_submission_has_no_user() {
        let mut repo = MockContactRepository::new();
        repo.expect_create()
            .withf(|contact| contact.user_id.is_none() && contact.status == ContactStatus::Pending)
            .returning(Ok);

        let service = ContactService::new(repo);
        let contact = service.submit(None, input()).await.unwrap();

        assert_eq!(contact.contact_type, ContactType::Complaint);
    }

    #[tokio::test]
    async fn test_signed_in_submission_is_linked() {
        let user_id = Uuid::now_v7();
        let mut repo = MockContactRepository::new();
        repo.expect_create()
            .withf(move |contact| contact.user_id == Some(user_id))
            .returning(Ok);

        let service = ContactService::new(repo);
        assert!(service.submit(Some(Principal::user(user_id)), input()).await.is_ok());
    }

    #[tokio::test]
    async fn test_triage_sets_status_and_response() {
        let contact = Contact::new(None, input());

        let mut repo = MockContactRepository::new();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(contact.clone())));
        repo.expect_update().returning(Ok);

        let service = ContactService::new(repo);
        let updated = service
            .update(
                Principal::admin(Uuid::now_v7()),
                Uuid::now_v7(),
                UpdateContact {
                    status: Some(ContactStatus::Resolved),
                    response: Some("A replacement is on its way.".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, ContactStatus::Resolved);
        assert!(updated.response.is_some());
    }

    #[tokio::test]
    async fn test_users_cannot_read_inbox() {
        let service = ContactService::new(MockContactRepository::new());
        let result = service.list(Principal::user(Uuid::now_v7())).await;

        assert!(matches!(result, Err(ContactError::Forbidden(_))));
    }
}
