use salvo::prelude::Json;
use salvo::{Depot, Router, handler};
use serde_json::json;

use apiary_service::auth::{DepotUser, depot::depot_keys};

/// ## Summary
/// Returns the authenticated caller as JSON, or `{"status":"public"}`.
#[handler]
async fn whoami(depot: &Depot) -> Json<serde_json::Value> {
    match depot.get::<DepotUser>(depot_keys::AUTHENTICATED_PRINCIPAL) {
        Ok(DepotUser::User(caller)) => Json(serde_json::to_value(caller).unwrap_or(json!(null))),
        Ok(DepotUser::Public) => Json(json!({"status":"public"})),
        Err(_) => Json(json!({"error":"User not found in depot"})),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("whoami").get(whoami)
}
