//! HTTP inbound adapter exposing the `/usuarios` REST endpoints.

use actix_web::web;

pub mod error;
pub mod state;
pub mod users;

pub use error::ApiResult;

/// Register the `/usuarios` handlers and the JSON body policy.
///
/// Bodies are parsed as JSON whatever their `Content-Type`; unreadable ones
/// become `400 {"error": "Corpo da requisição inválido!"}`. An unreadable
/// list query becomes `500 {"error": "Erro ao buscar usuários!"}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .content_type_required(false)
            .error_handler(error::json_error_handler),
    )
    .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
    .service(users::create_user)
    .service(users::list_users)
    .service(users::update_user)
    .service(users::delete_user);
}
