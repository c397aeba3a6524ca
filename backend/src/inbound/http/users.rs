//! `/usuarios` API handlers.
//!
//! ```text
//! POST   /usuarios       {"email":"ada@example.com","name":"Ada","age":36}
//! GET    /usuarios?email=&name=&age=
//! PUT    /usuarios/{id}  {"email":"ada@example.com","name":"Ada","age":37}
//! DELETE /usuarios/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{User, UserFilter, UserId, UserInput, UserQueryParams, UserServiceError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{ApiError, ErrorBody};
use crate::inbound::http::state::HttpState;

pub const USER_DELETED: &str = "Usuário deletado com sucesso!";

/// Confirmation body returned by `DELETE /usuarios/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeletedResponse {
    #[schema(example = "Usuário deletado com sucesso!")]
    pub message: String,
}

/// Parse the path identifier; malformed ids behave like unknown ones.
fn parse_id(raw: &str) -> Result<UserId, UserServiceError> {
    UserId::new(raw).map_err(|err| {
        debug!(id = raw, %err, "malformed user id in path");
        UserServiceError::not_found(raw)
    })
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/usuarios",
    request_body = UserInput,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid payload or email already in use", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    ),
    tags = ["usuarios"],
    operation_id = "createUser"
)]
#[post("/usuarios")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<Map<String, Value>>,
) -> ApiResult<HttpResponse> {
    let user = state
        .users_command
        .create(UserInput::from(payload.into_inner()))
        .await
        .map_err(ApiError::from_create)?;
    Ok(HttpResponse::Created().json(user))
}

/// List users, optionally filtered by exact field values.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use usuarios::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/usuarios",
    params(UserQueryParams),
    responses(
        (status = 200, description = "Matching users, oldest first", body = [User]),
        (status = 500, description = "Storage failure", body = ErrorBody)
    ),
    tags = ["usuarios"],
    operation_id = "listUsers"
)]
#[get("/usuarios")]
pub async fn list_users(
    state: web::Data<HttpState>,
    query: web::Query<UserQueryParams>,
) -> ApiResult<web::Json<Vec<User>>> {
    let filter = UserFilter::from_query(query.into_inner());
    let users = state
        .users_query
        .list(&filter)
        .await
        .map_err(ApiError::from_list)?;
    Ok(web::Json(users))
}

/// Replace the fields of an existing user.
#[utoipa::path(
    put,
    path = "/usuarios/{id}",
    params(("id" = String, Path, description = "User identifier (UUID)")),
    request_body = UserInput,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Invalid payload, unknown user or email collision", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    ),
    tags = ["usuarios"],
    operation_id = "updateUser"
)]
#[put("/usuarios/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<Map<String, Value>>,
) -> ApiResult<web::Json<User>> {
    let input = UserInput::from(payload.into_inner());
    // Payload errors take precedence over an unusable id.
    let id = match parse_id(&path) {
        Ok(id) => id,
        Err(err) => {
            let failure = match input.into_draft() {
                Err(errors) => UserServiceError::Validation(errors),
                Ok(_) => err,
            };
            return Err(ApiError::from_update(failure));
        }
    };

    let user = state
        .users_command
        .update(&id, input)
        .await
        .map_err(ApiError::from_update)?;
    Ok(web::Json(user))
}

/// Remove a user.
#[utoipa::path(
    delete,
    path = "/usuarios/{id}",
    params(("id" = String, Path, description = "User identifier (UUID)")),
    responses(
        (status = 200, description = "User deleted", body = DeletedResponse),
        (status = 404, description = "Unknown user", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    ),
    tags = ["usuarios"],
    operation_id = "deleteUser"
)]
#[delete("/usuarios/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeletedResponse>> {
    let id = parse_id(&path).map_err(ApiError::from_delete)?;
    state
        .users_command
        .delete(&id)
        .await
        .map_err(ApiError::from_delete)?;
    Ok(web::Json(DeletedResponse {
        message: USER_DELETED.to_owned(),
    }))
}
