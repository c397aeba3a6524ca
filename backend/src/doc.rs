//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the four `/usuarios` operations and the schemas they
//! exchange. The document backs Swagger UI in debug builds and is exported
//! by `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::domain::{User, UserInput};
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::users::DeletedResponse;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cadastro de usuários API",
        description = "CRUD interface over user records (email, name, optional age)."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
    ),
    components(schemas(User, UserInput, ErrorBody, DeletedResponse)),
    tags(
        (name = "usuarios", description = "User registration and maintenance")
    )
)]
pub struct ApiDoc;
