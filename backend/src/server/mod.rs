//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use usuarios::ApiDoc;
use usuarios::domain::UserService;
use usuarios::inbound::http::{self, state::HttpState};
use usuarios::outbound::memory::InMemoryUserRepository;
use usuarios::outbound::persistence::{DbPool, DieselUserRepository};
use usuarios::{Cors, Trace};

/// Select the repository adapter: PostgreSQL when a pool is configured,
/// otherwise the in-memory store.
fn build_http_state(db_pool: Option<DbPool>) -> HttpState {
    match db_pool {
        Some(pool) => {
            info!("using PostgreSQL user repository");
            let service = UserService::new(Arc::new(DieselUserRepository::new(pool)));
            HttpState::from_service(Arc::new(service))
        }
        None => {
            info!("using in-memory user repository");
            let service = UserService::new(Arc::new(InMemoryUserRepository::new()));
            HttpState::from_service(Arc::new(service))
        }
    }
}

fn build_app(
    http_state: web::Data<HttpState>,
    allowed_origin: String,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<EitherBody<BoxBody>>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new().app_data(http_state).configure(http::configure);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.wrap(Cors::new(allowed_origin)).wrap(Trace)
}

/// Construct an Actix HTTP server from `config`.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        allowed_origin,
        db_pool,
    } = config;
    let http_state = web::Data::new(build_http_state(db_pool));

    let server = HttpServer::new(move || build_app(http_state.clone(), allowed_origin.clone()))
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, "server listening");
    Ok(server)
}
