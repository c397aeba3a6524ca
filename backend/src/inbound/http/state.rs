//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on the driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{UsersCommand, UsersQuery};

/// Dependency bundle for the `/usuarios` handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users_command: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
}

impl HttpState {
    pub fn new(users_command: Arc<dyn UsersCommand>, users_query: Arc<dyn UsersQuery>) -> Self {
        Self {
            users_command,
            users_query,
        }
    }

    /// Build state where one service implements both ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use usuarios::domain::UserService;
    /// use usuarios::inbound::http::state::HttpState;
    /// use usuarios::outbound::memory::InMemoryUserRepository;
    ///
    /// let service = Arc::new(UserService::new(Arc::new(InMemoryUserRepository::new())));
    /// let _state = HttpState::from_service(service);
    /// ```
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: UsersCommand + UsersQuery + 'static,
    {
        Self {
            users_command: service.clone(),
            users_query: service,
        }
    }
}
