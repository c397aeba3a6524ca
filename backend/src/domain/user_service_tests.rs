//! Tests for the user registry service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::MockUserRepository;
use crate::domain::{Age, AgeFilter, Email, UserDraft, UserName, UserValidationError};
use rstest::rstest;
use serde_json::json;

fn make_service(repo: MockUserRepository) -> UserService<MockUserRepository> {
    UserService::new(Arc::new(repo))
}

fn input(value: serde_json::Value) -> UserInput {
    serde_json::from_value(value).expect("object payload")
}

fn ann_input() -> UserInput {
    input(json!({ "email": "a@b.co", "name": "Ann", "age": 30 }))
}

fn stored(draft: &UserDraft) -> User {
    draft.clone().into_user(UserId::random())
}

fn ann() -> User {
    User::new(
        UserId::random(),
        Email::new("a@b.co").expect("valid email"),
        UserName::new("Ann").expect("valid name"),
        Some(Age::new(30).expect("valid age")),
    )
}

#[tokio::test]
async fn create_stores_validated_draft() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .withf(|email| email.as_ref() == "a@b.co")
        .times(1)
        .return_once(|_| Ok(None));
    repo.expect_create()
        .withf(|draft| draft.name.as_ref() == "Ann" && draft.age.map(Age::get) == Some(30))
        .times(1)
        .returning(|draft| Ok(stored(draft)));

    let user = make_service(repo)
        .create(ann_input())
        .await
        .expect("create succeeds");

    assert_eq!(user.email().as_ref(), "a@b.co");
    assert_eq!(user.age().map(Age::get), Some(30));
}

#[tokio::test]
async fn create_rejects_invalid_payload_without_touching_storage() {
    let repo = MockUserRepository::new();

    let err = make_service(repo)
        .create(input(json!({ "email": "bad", "name": "" })))
        .await
        .expect_err("payload is invalid");

    let UserServiceError::Validation(errors) = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(
        errors.errors(),
        &[
            UserValidationError::InvalidEmail,
            UserValidationError::MissingName
        ]
    );
}

#[tokio::test]
async fn create_reports_existing_email() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .times(1)
        .return_once(|_| Ok(Some(ann())));
    repo.expect_create().never();

    let err = make_service(repo)
        .create(ann_input())
        .await
        .expect_err("email is taken");

    assert_eq!(
        err,
        UserServiceError::EmailInUse {
            email: "a@b.co".to_owned()
        }
    );
}

#[tokio::test]
async fn create_maps_storage_unique_violation_to_email_in_use() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email().return_once(|_| Ok(None));
    repo.expect_create()
        .return_once(|_| Err(UserPersistenceError::unique_violation("users_email_key")));

    let err = make_service(repo)
        .create(ann_input())
        .await
        .expect_err("racing create loses");

    assert!(matches!(err, UserServiceError::EmailInUse { .. }));
}

#[rstest]
#[case(UserPersistenceError::connection("refused"))]
#[case(UserPersistenceError::query("syntax"))]
#[tokio::test]
async fn create_surfaces_persistence_failures(#[case] failure: UserPersistenceError) {
    let mut repo = MockUserRepository::new();
    let expected = failure.clone();
    repo.expect_find_by_email()
        .return_once(move |_| Err(failure));

    let err = make_service(repo)
        .create(ann_input())
        .await
        .expect_err("storage failed");

    assert_eq!(err, UserServiceError::Persistence(expected));
}

#[tokio::test]
async fn update_maps_missing_record_to_not_found() {
    let id = UserId::random();
    let mut repo = MockUserRepository::new();
    repo.expect_update()
        .times(1)
        .return_once(|_, _| Err(UserPersistenceError::not_found()));

    let err = make_service(repo)
        .update(&id, ann_input())
        .await
        .expect_err("record is missing");

    assert_eq!(err, UserServiceError::not_found(id.to_string()));
}

#[tokio::test]
async fn update_maps_unique_violation_to_conflict() {
    let id = UserId::random();
    let mut repo = MockUserRepository::new();
    repo.expect_update()
        .return_once(|_, _| Err(UserPersistenceError::unique_violation("users_email_key")));

    let err = make_service(repo)
        .update(&id, ann_input())
        .await
        .expect_err("email collides");

    assert_eq!(err, UserServiceError::Conflict { id });
}

#[tokio::test]
async fn update_revalidates_without_uniqueness_lookup() {
    let id = UserId::random();
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email().never();
    repo.expect_update()
        .withf(move |target, _| *target == id)
        .times(1)
        .returning(|target, draft| Ok(draft.clone().into_user(*target)));

    let user = make_service(repo)
        .update(&id, ann_input())
        .await
        .expect("update succeeds");

    assert_eq!(user.id(), &id);
}

#[tokio::test]
async fn update_rejects_invalid_payload() {
    let mut repo = MockUserRepository::new();
    repo.expect_update().never();

    let err = make_service(repo)
        .update(&UserId::random(), input(json!({ "email": "a@b.co", "name": "Ann", "age": 0 })))
        .await
        .expect_err("age is invalid");

    assert!(matches!(err, UserServiceError::Validation(_)));
}

#[rstest]
#[case(Ok(()), None)]
#[case(Err(UserPersistenceError::not_found()), Some("not found"))]
#[case(Err(UserPersistenceError::connection("down")), Some("connection"))]
#[tokio::test]
async fn delete_maps_repository_outcomes(
    #[case] outcome: Result<(), UserPersistenceError>,
    #[case] expected_error: Option<&str>,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_delete().times(1).return_once(move |_| outcome);

    let result = make_service(repo).delete(&UserId::random()).await;

    match (result, expected_error) {
        (Ok(()), None) => {}
        (Err(err), Some(fragment)) => assert!(
            err.to_string().contains(fragment),
            "unexpected error: {err}"
        ),
        (other, expected) => panic!("got {other:?}, expected {expected:?}"),
    }
}

#[tokio::test]
async fn list_passes_filter_through() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_many()
        .withf(|filter| filter.age() == Some(&AgeFilter::Unparseable("abc".to_owned())))
        .times(1)
        .return_once(|_| Ok(Vec::new()));

    let filter = UserFilter::all().with_age(AgeFilter::Unparseable("abc".to_owned()));
    let users = make_service(repo).list(&filter).await.expect("list succeeds");

    assert!(users.is_empty());
}

#[tokio::test]
async fn list_surfaces_persistence_failures() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_many()
        .return_once(|_| Err(UserPersistenceError::query("boom")));

    let err = make_service(repo)
        .list(&UserFilter::all())
        .await
        .expect_err("storage failed");

    assert!(matches!(err, UserServiceError::Persistence(_)));
}
