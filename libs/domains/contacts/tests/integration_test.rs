//! Postgres-backed tests for the contacts domain
//!
//! Run with `cargo test -p domain_contacts -- --ignored` (requires Docker).

use axum_helpers::Principal;
use domain_contacts::*;
use test_utils::{TestDataBuilder, TestDatabase};

fn message(email: String) -> CreateContact {
    CreateContact {
        name: "Sam Lee".to_string(),
        email,
        phone: Some("+1 555 0100".to_string()),
        subject: "Order question".to_string(),
        message: "Can I change my delivery address?".to_string(),
        contact_type: ContactType::Support,
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_submission_and_triage() {
    let db = TestDatabase::new().await;
    let service = ContactService::new(PgContactRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("contact_triage");

    let user = Principal::user(db.create_test_user(builder.id(1)).await);
    let admin = Principal::admin(builder.id(2));

    let anonymous = service
        .submit(None, message(builder.email("anon")))
        .await
        .unwrap();
    let linked = service
        .submit(Some(user), message(builder.email("user")))
        .await
        .unwrap();

    assert_eq!(anonymous.user_id, None);
    assert_eq!(linked.user_id, Some(user.id));
    assert_eq!(linked.status, ContactStatus::Pending);

    let inbox = service.list(admin).await.unwrap();
    assert_eq!(inbox.len(), 2);
    assert_eq!(inbox[0].id, linked.id);

    let own = service.my_contacts(user).await.unwrap();
    assert_eq!(own.len(), 1);

    let triaged = service
        .update(
            admin,
            linked.id,
            UpdateContact {
                status: Some(ContactStatus::InProgress),
                response: Some("Looking into it.".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(triaged.status, ContactStatus::InProgress);
    assert_eq!(triaged.response.as_deref(), Some("Looking into it."));

    service.delete(admin, anonymous.id).await.unwrap();
    let result = service.get(admin, anonymous.id).await;
    assert!(matches!(result, Err(ContactError::NotFound(_))));
}
