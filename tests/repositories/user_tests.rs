//! User Repository Tests

use pretty_assertions::assert_eq;
use tokio_test::{assert_err, assert_ok};

use aroma_data::domain::{User, UserRepository};

use crate::common::{fake_user, user_repository, MemoryDatabase};

/// A saved user reads back equal, apart from the store-assigned join time
#[tokio::test]
async fn test_save_then_get_round_trips() {
    // Arrange
    let database = MemoryDatabase::new();
    let repository = user_repository(&database);
    let user = fake_user();

    // Act
    assert_ok!(repository.save_user(&user).await);
    let read = assert_ok!(repository.get_user(&user.user_id).await);

    // Assert
    assert!(read.time_joined.is_some());
    assert_eq!(User { time_joined: None, ..read }, user);
}

/// Saving twice updates in place and keeps the original join time
#[tokio::test]
async fn test_save_is_an_upsert() {
    let database = MemoryDatabase::new();
    let repository = user_repository(&database);
    let mut user = fake_user();

    repository.save_user(&user).await.unwrap();
    let joined = repository.get_user(&user.user_id).await.unwrap().time_joined;

    user.first_name = Some("Renamed".into());
    repository.save_user(&user).await.unwrap();

    let read = repository.get_user(&user.user_id).await.unwrap();
    assert_eq!(read.first_name.as_deref(), Some("Renamed"));
    assert_eq!(read.time_joined, joined);
    assert_eq!(repository.get_recently_created_users().await.len(), 1);
}

/// Lookups by email and GitHub profile find the saved user
#[tokio::test]
async fn test_secondary_lookups() {
    let database = MemoryDatabase::new();
    let repository = user_repository(&database);
    let user = fake_user();
    repository.save_user(&user).await.unwrap();

    let by_email = assert_ok!(repository.get_user_by_email(user.email.as_deref().unwrap()).await);
    let by_github = assert_ok!(
        repository
            .find_by_github_profile(user.github_profile.as_deref().unwrap())
            .await
    );

    assert_eq!(by_email.user_id, user.user_id);
    assert_eq!(by_github.user_id, user.user_id);
}

/// Unknown email is DoesNotExist, not a failure
#[tokio::test]
async fn test_unknown_email_does_not_exist() {
    let database = MemoryDatabase::new();
    let repository = user_repository(&database);

    let error = assert_err!(repository.get_user_by_email("nobody@example.com").await);
    assert!(error.is_does_not_exist());
}

/// contains_user answers the same way until something is written
#[tokio::test]
async fn test_contains_is_idempotent() {
    let database = MemoryDatabase::new();
    let repository = user_repository(&database);
    let user = fake_user();

    let first = repository.contains_user(&user.user_id).await.unwrap();
    let second = repository.contains_user(&user.user_id).await.unwrap();
    assert!(!first);
    assert_eq!(first, second);

    repository.save_user(&user).await.unwrap();
    assert!(repository.contains_user(&user.user_id).await.unwrap());
    assert!(repository.contains_user(&user.user_id).await.unwrap());
}

/// A deleted user no longer exists
#[tokio::test]
async fn test_delete_user() {
    let database = MemoryDatabase::new();
    let repository = user_repository(&database);
    let user = fake_user();
    repository.save_user(&user).await.unwrap();

    assert_ok!(repository.delete_user(&user.user_id).await);

    assert!(!repository.contains_user(&user.user_id).await.unwrap());
    let error = assert_err!(repository.get_user(&user.user_id).await);
    assert!(error.is_does_not_exist());
}

/// Recent users come back newest first
#[tokio::test]
async fn test_recent_users_newest_first() {
    let database = MemoryDatabase::new();
    let repository = user_repository(&database);
    let older = fake_user();
    let newer = fake_user();

    repository.save_user(&older).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    repository.save_user(&newer).await.unwrap();

    let ids: Vec<String> = repository
        .get_recently_created_users()
        .await
        .into_iter()
        .map(|user| user.user_id)
        .collect();
    assert_eq!(ids, vec![newer.user_id, older.user_id]);
}

/// Store failures surface on point operations and degrade on listing
#[tokio::test]
async fn test_store_failures() {
    let database = MemoryDatabase::new();
    let repository = user_repository(&database);
    let user = fake_user();
    repository.save_user(&user).await.unwrap();

    database.set_failing(true);

    assert!(repository.save_user(&user).await.unwrap_err().is_operation_failed());
    assert!(repository.get_user(&user.user_id).await.unwrap_err().is_operation_failed());
    assert!(repository.delete_user(&user.user_id).await.unwrap_err().is_operation_failed());
    assert!(repository.contains_user(&user.user_id).await.unwrap_err().is_operation_failed());
    assert!(repository.get_recently_created_users().await.is_empty());

    database.set_failing(false);
    assert_ok!(repository.get_user(&user.user_id).await);
}

/// Invalid input never reaches the store
#[tokio::test]
async fn test_invalid_input_is_not_sent() {
    let database = MemoryDatabase::new();
    let repository = user_repository(&database);

    assert!(repository.save_user(&User::default()).await.unwrap_err().is_invalid_argument());
    assert!(repository.get_user("alice").await.unwrap_err().is_invalid_argument());
    assert!(repository.get_user_by_email("").await.unwrap_err().is_invalid_argument());
    assert!(repository.find_by_github_profile("").await.unwrap_err().is_invalid_argument());

    assert!(database.statements().is_empty());
}

/// Only the lowercase hyphenated spelling of an ID is accepted, so what is
/// saved is exactly what reads back
#[tokio::test]
async fn test_ids_must_be_canonical() {
    let database = MemoryDatabase::new();
    let repository = user_repository(&database);
    let user = fake_user();
    let id = uuid::Uuid::parse_str(&user.user_id).unwrap();

    for spelling in [
        id.simple().to_string().to_uppercase(),
        id.hyphenated().to_string().to_uppercase(),
        id.simple().to_string(),
    ] {
        let renamed = User {
            user_id: spelling.clone(),
            ..user.clone()
        };
        let error = assert_err!(repository.save_user(&renamed).await);
        assert!(error.is_invalid_argument(), "{}", spelling);
        assert!(assert_err!(repository.get_user(&spelling).await).is_invalid_argument());
    }
    assert!(database.statements().is_empty());

    repository.save_user(&user).await.unwrap();
    let read = repository.get_user(&user.user_id).await.unwrap();
    assert_eq!(read.user_id, user.user_id);
}
