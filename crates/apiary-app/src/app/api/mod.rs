mod app_specific;
mod group;

use salvo::Router;

use crate::middleware::auth::AuthMiddleware;

// Re-export route constants from core
pub use apiary_core::constants::{
    API_ROUTE_COMPONENT, API_ROUTE_PREFIX, APP_ROUTE_COMPONENT, APP_ROUTE_PREFIX,
    GROUP_ROUTE_COMPONENT, GROUP_ROUTE_PREFIX,
};

/// ## Summary
/// Constructs the API router: app-specific endpoints and the group endpoints,
/// all behind the auth middleware.
#[must_use]
pub fn routes() -> Router {
    Router::with_path(API_ROUTE_COMPONENT)
        .hoop(AuthMiddleware)
        .push(app_specific::routes())
        .push(group::routes())
}
