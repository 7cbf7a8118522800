//! Message Repository Tests

use pretty_assertions::assert_eq;
use tokio_test::{assert_err, assert_ok};
use uuid::Uuid;

use aroma_data::domain::{Message, MessageRepository};

use crate::common::{fake_message, message_repository, MemoryDatabase};

/// A saved message reads back with the receive time filled in
#[tokio::test]
async fn test_save_then_get_round_trips() {
    let database = MemoryDatabase::new();
    let repository = message_repository(&database);
    let message = fake_message(&Uuid::new_v4().to_string());

    assert_ok!(repository.save_message(&message).await);
    let read = assert_ok!(
        repository
            .get_message(&message.application_id, &message.message_id)
            .await
    );

    assert!(read.time_message_received.is_some());
    assert_eq!(
        Message {
            time_message_received: None,
            ..read
        },
        message
    );
}

/// Messages are scoped to their application
#[tokio::test]
async fn test_messages_are_keyed_by_application() {
    let database = MemoryDatabase::new();
    let repository = message_repository(&database);
    let application = Uuid::new_v4().to_string();
    let other_application = Uuid::new_v4().to_string();

    let message = fake_message(&application);
    repository.save_message(&message).await.unwrap();
    repository.save_message(&fake_message(&application)).await.unwrap();
    repository.save_message(&fake_message(&other_application)).await.unwrap();

    assert_eq!(repository.get_count_by_application(&application).await.unwrap(), 2);
    assert_eq!(repository.get_messages_for_application(&application).await.unwrap().len(), 2);

    let error = assert_err!(
        repository
            .get_message(&other_application, &message.message_id)
            .await
    );
    assert!(error.is_does_not_exist());
}

/// Deleting a message removes it from counts and lookups
#[tokio::test]
async fn test_delete_message() {
    let database = MemoryDatabase::new();
    let repository = message_repository(&database);
    let message = fake_message(&Uuid::new_v4().to_string());
    repository.save_message(&message).await.unwrap();

    assert!(repository
        .contains_message(&message.application_id, &message.message_id)
        .await
        .unwrap());

    assert_ok!(
        repository
            .delete_message(&message.application_id, &message.message_id)
            .await
    );

    assert!(!repository
        .contains_message(&message.application_id, &message.message_id)
        .await
        .unwrap());
    assert_eq!(
        repository.get_count_by_application(&message.application_id).await.unwrap(),
        0
    );
}

/// Listing degrades to empty while counting reports the failure
#[tokio::test]
async fn test_store_failures() {
    let database = MemoryDatabase::new();
    let repository = message_repository(&database);
    let application = Uuid::new_v4().to_string();
    repository.save_message(&fake_message(&application)).await.unwrap();

    database.set_failing(true);

    assert!(repository.get_messages_for_application(&application).await.unwrap().is_empty());
    assert!(repository
        .get_count_by_application(&application)
        .await
        .unwrap_err()
        .is_operation_failed());
}

/// A message without an application is rejected
#[tokio::test]
async fn test_message_without_application_is_rejected() {
    let database = MemoryDatabase::new();
    let repository = message_repository(&database);
    let message = fake_message("");

    let error = assert_err!(repository.save_message(&message).await);

    assert!(error.is_invalid_argument());
    assert!(database.statements().is_empty());
}

/// Saving a message again keeps the time it was first received
#[tokio::test]
async fn test_upsert_keeps_receive_time() {
    let database = MemoryDatabase::new();
    let repository = message_repository(&database);
    let mut message = fake_message(&Uuid::new_v4().to_string());
    repository.save_message(&message).await.unwrap();
    let first = repository
        .get_message(&message.application_id, &message.message_id)
        .await
        .unwrap();

    message.title = Some("Retitled".into());
    repository.save_message(&message).await.unwrap();
    let second = repository
        .get_message(&message.application_id, &message.message_id)
        .await
        .unwrap();

    assert_eq!(second.title.as_deref(), Some("Retitled"));
    assert!(first.time_message_received.is_some());
    assert_eq!(second.time_message_received, first.time_message_received);
}

#[tokio::test]
async fn test_messages_by_hostname_and_title() {
    let database = MemoryDatabase::new();
    let repository = message_repository(&database);
    let application = Uuid::new_v4().to_string();

    let mut from_db_host = fake_message(&application);
    from_db_host.hostname = Some("db-01".into());
    from_db_host.title = Some("Replica lag".into());
    let other = fake_message(&application);
    let mut elsewhere = fake_message(&Uuid::new_v4().to_string());
    elsewhere.hostname = Some("db-01".into());
    for message in [&from_db_host, &other, &elsewhere] {
        repository.save_message(message).await.unwrap();
    }

    let by_host = assert_ok!(repository.get_messages_by_hostname(&application, "db-01").await);
    assert_eq!(by_host.len(), 1);
    assert_eq!(by_host[0].message_id, from_db_host.message_id);

    let by_title = assert_ok!(repository.get_messages_by_title(&application, "Replica lag").await);
    assert_eq!(by_title.len(), 1);
    assert_eq!(by_title[0].message_id, from_db_host.message_id);

    assert!(repository
        .get_messages_by_title(&application, "No such title")
        .await
        .unwrap()
        .is_empty());
}

/// Filtered listings validate their input before the store sees it
#[tokio::test]
async fn test_filtered_listing_rejects_empty_filter() {
    let database = MemoryDatabase::new();
    let repository = message_repository(&database);
    let application = Uuid::new_v4().to_string();

    assert!(assert_err!(repository.get_messages_by_hostname(&application, "").await).is_invalid_argument());
    assert!(assert_err!(repository.get_messages_by_title("", "Build").await).is_invalid_argument());
    assert!(database.statements().is_empty());
}
