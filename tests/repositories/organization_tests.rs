//! Organization Repository Tests

use pretty_assertions::assert_eq;
use tokio_test::{assert_err, assert_ok};
use uuid::Uuid;

use aroma_data::domain::{Organization, OrganizationRepository};

use crate::common::{fake_organization, organization_repository, MemoryDatabase};

#[tokio::test]
async fn test_save_then_get_round_trips() {
    let database = MemoryDatabase::new();
    let repository = organization_repository(&database);
    let organization = fake_organization();

    assert_ok!(repository.save_organization(&organization).await);
    let read = assert_ok!(repository.get_organization(&organization.organization_id).await);

    assert_eq!(read, organization);
}

/// Owners are optional, a name is not
#[tokio::test]
async fn test_owner_and_name_requirements() {
    let database = MemoryDatabase::new();
    let repository = organization_repository(&database);

    let without_owners = Organization::new(Uuid::new_v4().to_string(), "Ownerless");
    assert_ok!(repository.save_organization(&without_owners).await);

    let mut without_name = fake_organization();
    without_name.organization_name = None;
    let error = assert_err!(repository.save_organization(&without_name).await);
    assert!(error.is_invalid_argument());

    let mut with_bad_owner = fake_organization();
    with_bad_owner.owners.push("mallory".into());
    let error = assert_err!(repository.save_organization(&with_bad_owner).await);
    assert!(error.is_invalid_argument());
}

#[tokio::test]
async fn test_search_by_name_is_case_insensitive() {
    let database = MemoryDatabase::new();
    let repository = organization_repository(&database);
    let organization = Organization::new(Uuid::new_v4().to_string(), "Blue Harbor Labs");
    repository.save_organization(&organization).await.unwrap();
    repository
        .save_organization(&Organization::new(Uuid::new_v4().to_string(), "Red Cliff"))
        .await
        .unwrap();

    let found = repository.search_by_name("harbor").await.unwrap();

    assert_eq!(found, vec![organization]);
}

#[tokio::test]
async fn test_delete_organization() {
    let database = MemoryDatabase::new();
    let repository = organization_repository(&database);
    let organization = fake_organization();
    repository.save_organization(&organization).await.unwrap();

    assert_ok!(repository.delete_organization(&organization.organization_id).await);

    assert!(!repository
        .contains_organization(&organization.organization_id)
        .await
        .unwrap());
    let error = assert_err!(repository.get_organization(&organization.organization_id).await);
    assert!(error.is_does_not_exist());
}

#[tokio::test]
async fn test_search_degrades_on_store_failure() {
    let database = MemoryDatabase::new();
    let repository = organization_repository(&database);
    repository.save_organization(&fake_organization()).await.unwrap();

    database.set_failing(true);

    assert!(repository.search_by_name("a").await.unwrap().is_empty());
    assert!(repository
        .contains_organization(&Uuid::new_v4().to_string())
        .await
        .unwrap_err()
        .is_operation_failed());
}

/// Wildcard characters in a search term match only themselves
#[tokio::test]
async fn test_search_term_is_literal() {
    let database = MemoryDatabase::new();
    let repository = organization_repository(&database);
    repository
        .save_organization(&Organization::new(Uuid::new_v4().to_string(), "Plain Name"))
        .await
        .unwrap();
    let percent = Organization::new(Uuid::new_v4().to_string(), "100% Uptime");
    repository.save_organization(&percent).await.unwrap();

    assert!(repository.search_by_name("_").await.unwrap().is_empty());
    assert_eq!(repository.search_by_name("%").await.unwrap(), vec![percent]);
}

#[tokio::test]
async fn test_members() {
    let database = MemoryDatabase::new();
    let repository = organization_repository(&database);
    let organization = fake_organization();
    repository.save_organization(&organization).await.unwrap();
    let org_id = &organization.organization_id;

    let mut users = vec![Uuid::new_v4().to_string(), Uuid::new_v4().to_string()];
    users.sort();
    for user in &users {
        assert_ok!(repository.save_member(org_id, user).await);
    }
    assert_ok!(repository.save_member(org_id, &users[0]).await);

    assert_eq!(repository.get_members(org_id).await.unwrap(), users);
    assert!(repository.is_member(org_id, &users[1]).await.unwrap());

    assert_ok!(repository.delete_member(org_id, &users[1]).await);
    assert!(!repository.is_member(org_id, &users[1]).await.unwrap());
    assert_eq!(repository.get_members(org_id).await.unwrap(), vec![users[0].clone()]);

    assert_ok!(repository.delete_all_members(org_id).await);
    assert!(repository.get_members(org_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_owner_removal() {
    let database = MemoryDatabase::new();
    let repository = organization_repository(&database);
    let mut organization = fake_organization();
    let kept = organization.owners[0].clone();
    let removed = Uuid::new_v4().to_string();
    organization.owners.push(removed.clone());
    repository.save_organization(&organization).await.unwrap();
    let org_id = &organization.organization_id;

    assert_ok!(repository.delete_owner(org_id, &removed).await);
    assert_eq!(repository.get_organization(org_id).await.unwrap().owners, vec![kept]);

    assert_ok!(repository.delete_all_owners(org_id).await);
    let read = repository.get_organization(org_id).await.unwrap();
    assert!(read.owners.is_empty());
    assert_eq!(read.organization_name, organization.organization_name);
}

/// Member and owner operations reject bad IDs without touching the store
#[tokio::test]
async fn test_membership_rejects_bad_ids() {
    let database = MemoryDatabase::new();
    let repository = organization_repository(&database);
    let org_id = Uuid::new_v4().to_string();

    assert!(assert_err!(repository.save_member(&org_id, "bob").await).is_invalid_argument());
    assert!(assert_err!(repository.delete_owner("", &org_id).await).is_invalid_argument());
    assert!(assert_err!(repository.get_members("acme").await).is_invalid_argument());
    assert!(database.statements().is_empty());
}
