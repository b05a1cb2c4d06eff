use salvo::Depot;
use tracing::error;

use crate::{config::get_config_from_depot, user_store_handler::get_users_from_depot};
use apiary_service::auth::{DepotUser, authenticate::authenticate, depot::depot_keys};
use apiary_service::error::ServiceError;

/// ## Summary
/// Authentication middleware that resolves the caller and stores it in the depot.
///
/// Requests whose caller cannot be resolved continue as `DepotUser::Public`;
/// handlers decide what a public request may do.
///
/// ## Side Effects
/// Inserts a `DepotUser` under `depot_keys::AUTHENTICATED_PRINCIPAL`.
///
/// ## Errors
/// Returns an HTTP 500 response if the configuration or user store is missing from the depot.
#[salvo::async_trait]
impl salvo::Handler for AuthMiddleware {
    #[tracing::instrument(skip(self, req, depot, res, ctrl), fields(
        method = %req.method(),
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        tracing::trace!("Authenticating request");

        if req.method() == salvo::http::Method::OPTIONS {
            depot.insert(depot_keys::AUTHENTICATED_PRINCIPAL, DepotUser::Public);
            return;
        }

        let config = match get_config_from_depot(depot) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!(error = ?e, "Failed to get config from depot");
                res.status_code(salvo::http::StatusCode::INTERNAL_SERVER_ERROR);
                ctrl.skip_rest();
                return;
            }
        };

        let users = match get_users_from_depot(depot) {
            Ok(users) => users,
            Err(e) => {
                error!(error = ?e, "Failed to get user store from depot");
                res.status_code(salvo::http::StatusCode::INTERNAL_SERVER_ERROR);
                ctrl.skip_rest();
                return;
            }
        };

        match authenticate(req, users.as_ref(), &config).await {
            Ok(caller) => {
                tracing::debug!(uid = caller.uid, "Caller authenticated successfully");
                depot.insert(depot_keys::AUTHENTICATED_PRINCIPAL, DepotUser::User(caller));
            }
            Err(ServiceError::NotAuthenticated) => {
                tracing::debug!("Request not authenticated, treating as public");
                depot.insert(depot_keys::AUTHENTICATED_PRINCIPAL, DepotUser::Public);
            }
            Err(service_err) => {
                error!(error = ?service_err, "Authentication failed, treating as public");
                depot.insert(depot_keys::AUTHENTICATED_PRINCIPAL, DepotUser::Public);
            }
        }
    }
}

/// ## Summary
/// Middleware handler for authentication.
/// Use this as a hoop on routes whose handlers need the caller.
pub struct AuthMiddleware;
