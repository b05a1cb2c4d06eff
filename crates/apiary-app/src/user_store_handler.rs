use salvo::async_trait;
use std::sync::Arc;

use crate::error::AppResult;
use apiary_core::error::CoreError;
use apiary_service::store::UserStore;

/// Makes the user store available to the auth middleware.
pub struct UserStoreHandler {
    pub users: Arc<dyn UserStore>,
}

#[async_trait]
impl salvo::Handler for UserStoreHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(Arc::clone(&self.users));
    }
}

/// ## Summary
/// Retrieves the user store from the depot.
///
/// ## Errors
/// Returns an error if the user store is not found in the depot.
pub fn get_users_from_depot(depot: &salvo::Depot) -> AppResult<Arc<dyn UserStore>> {
    depot
        .obtain::<Arc<dyn UserStore>>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("User store not found in depot").into())
}
