//! Tests for HTTP error mapping.

use super::*;
use crate::domain::ports::UserPersistenceError;
use crate::domain::{UserId, UserInput};
use actix_web::body::to_bytes;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn validation_failure() -> UserServiceError {
    let input: UserInput =
        serde_json::from_value(json!({ "email": "bad", "name": " ", "age": -1 }))
            .expect("object payload");
    let errors = input.into_draft().expect_err("payload is invalid");
    UserServiceError::Validation(errors)
}

fn persistence_failure() -> UserServiceError {
    UserServiceError::Persistence(UserPersistenceError::connection("secret dsn detail"))
}

fn message_of(err: &ApiError) -> Option<&str> {
    match err.body() {
        ErrorBody::Message { error } => Some(error.as_str()),
        ErrorBody::Validation { .. } => None,
    }
}

#[rstest]
fn validation_lists_every_message_in_field_order(validation_failure: UserServiceError) {
    let err = ApiError::from_create(validation_failure);

    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        err.body(),
        &ErrorBody::Validation {
            errors: vec![
                "O Email é inválido!".to_owned(),
                "O Nome é obrigatório!".to_owned(),
                "A Idade deve ser um número inteiro maior que 0!".to_owned(),
            ]
        }
    );
}

#[rstest]
#[case(
    UserServiceError::EmailInUse { email: "a@b.co".to_owned() },
    StatusCode::BAD_REQUEST,
    EMAIL_IN_USE
)]
#[case(persistence_failure(), StatusCode::INTERNAL_SERVER_ERROR, CREATE_FAILED)]
fn create_failures(
    #[case] failure: UserServiceError,
    #[case] status: StatusCode,
    #[case] message: &str,
) {
    let err = ApiError::from_create(failure);
    assert_eq!(err.status_code(), status);
    assert_eq!(message_of(&err), Some(message));
}

#[rstest]
fn list_failures_are_internal() {
    let err = ApiError::from_list(persistence_failure());
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(message_of(&err), Some(LIST_FAILED));
}

#[rstest]
#[case(UserServiceError::not_found("nope"), StatusCode::BAD_REQUEST)]
#[case(UserServiceError::Conflict { id: UserId::random() }, StatusCode::BAD_REQUEST)]
#[case(persistence_failure(), StatusCode::INTERNAL_SERVER_ERROR)]
fn update_failures_share_one_message(#[case] failure: UserServiceError, #[case] status: StatusCode) {
    let err = ApiError::from_update(failure);
    assert_eq!(err.status_code(), status);
    assert_eq!(message_of(&err), Some(UPDATE_FAILED));
}

#[rstest]
#[case(UserServiceError::not_found("nope"), StatusCode::NOT_FOUND, USER_NOT_FOUND)]
#[case(persistence_failure(), StatusCode::INTERNAL_SERVER_ERROR, DELETE_FAILED)]
fn delete_failures(
    #[case] failure: UserServiceError,
    #[case] status: StatusCode,
    #[case] message: &str,
) {
    let err = ApiError::from_delete(failure);
    assert_eq!(err.status_code(), status);
    assert_eq!(message_of(&err), Some(message));
}

#[rstest]
#[actix_web::test]
async fn response_body_is_a_single_key_object_without_internal_detail() {
    let response = ApiError::from_list(persistence_failure()).error_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let value: Value = serde_json::from_slice(&bytes).expect("JSON body");

    assert_eq!(value, json!({ "error": LIST_FAILED }));
    assert!(!String::from_utf8_lossy(&bytes).contains("secret dsn detail"));
}

#[rstest]
#[actix_web::test]
async fn validation_body_uses_errors_key(validation_failure: UserServiceError) {
    let response = ApiError::from_update(validation_failure).error_response();

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let value: Value = serde_json::from_slice(&bytes).expect("JSON body");

    let object = value.as_object().expect("object body");
    assert_eq!(object.len(), 1);
    assert_eq!(object["errors"].as_array().map(Vec::len), Some(3));
}

#[rstest]
fn display_includes_status_and_messages() {
    assert_eq!(
        ApiError::invalid_body().to_string(),
        format!("400 Bad Request: {INVALID_BODY}")
    );
}

#[rstest]
fn unreadable_list_query_reads_as_a_list_failure() {
    let err = ApiError::invalid_list_query();
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(message_of(&err), Some(LIST_FAILED));
}
