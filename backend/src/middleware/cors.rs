//! Single-origin CORS policy.
//!
//! Preflight (`OPTIONS`) requests on any path are answered here with `200`
//! and an empty body; they never reach a handler. Other responses gain
//! `Access-Control-Allow-Origin` when the request's `Origin` is the allowed
//! one.

use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use actix_web::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    HeaderValue, ORIGIN, VARY,
};
use actix_web::{Error, HttpResponse};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::error;

/// Methods advertised to preflight requests.
pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
/// Request headers advertised to preflight requests.
pub const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

/// CORS middleware allowing exactly one origin.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use usuarios::Cors;
///
/// let app = App::new().wrap(Cors::new("https://example.com"));
/// ```
#[derive(Clone, Debug)]
pub struct Cors {
    allowed_origin: String,
}

impl Cors {
    /// Allow `origin`, given as serialised by browsers (scheme, host and
    /// optional port, no trailing slash).
    pub fn new(origin: impl AsRef<str>) -> Self {
        Self {
            allowed_origin: origin.as_ref().to_owned(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Cors
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = CorsMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        match HeaderValue::from_str(&self.allowed_origin) {
            Ok(origin) => ready(Ok(CorsMiddleware { service, origin })),
            Err(err) => {
                error!(
                    origin = %self.allowed_origin,
                    error = %err,
                    "allowed origin is not a valid header value"
                );
                ready(Err(()))
            }
        }
    }
}

/// Service wrapper produced by [`Cors`].
pub struct CorsMiddleware<S> {
    service: S,
    origin: HeaderValue,
}

impl<S> CorsMiddleware<S> {
    fn preflight(&self) -> HttpResponse {
        HttpResponse::Ok()
            .insert_header((ACCESS_CONTROL_ALLOW_ORIGIN, self.origin.clone()))
            .insert_header((ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS))
            .insert_header((ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS))
            .finish()
    }
}

impl<S, B> Service<ServiceRequest> for CorsMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if req.method() == Method::OPTIONS {
            let res = req.into_response(self.preflight()).map_into_right_body();
            return Box::pin(ready(Ok(res)));
        }

        let origin_allowed = req.headers().get(ORIGIN) == Some(&self.origin);
        let origin = self.origin.clone();
        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;
            let headers = res.headers_mut();
            headers.insert(VARY, HeaderValue::from_static("Origin"));
            if origin_allowed {
                headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin);
            }
            Ok(res.map_into_left_body())
        })
    }
}
