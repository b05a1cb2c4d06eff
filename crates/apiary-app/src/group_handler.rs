use salvo::async_trait;
use std::sync::Arc;

use crate::error::AppResult;
use apiary_core::error::CoreError;
use apiary_service::group::GroupService;

pub struct GroupServiceHandler {
    pub service: Arc<GroupService>,
}

#[async_trait]
impl salvo::Handler for GroupServiceHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(Arc::clone(&self.service));
    }
}

/// ## Summary
/// Retrieves the group service from the depot.
///
/// ## Errors
/// Returns an error if the group service is not found in the depot.
pub fn get_group_service_from_depot(depot: &salvo::Depot) -> AppResult<Arc<GroupService>> {
    depot
        .obtain::<Arc<GroupService>>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Group service not found in depot").into())
}
