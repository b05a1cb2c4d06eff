use apiary_core::config::{AuthMethod, Settings};
use apiary_core::types::UserId;

use crate::error::{ServiceError, ServiceResult};
use crate::store::UserStore;

use super::caller::Caller;

/// ## Summary
/// Resolves a uid through the user store.
///
/// ## Errors
/// Returns `NotAuthenticated` if no such user exists, or the store error.
async fn resolve(users: &dyn UserStore, uid: UserId) -> ServiceResult<Caller> {
    users
        .find_by_id(uid)
        .await?
        .map(Caller::from)
        .ok_or(ServiceError::NotAuthenticated)
}

#[tracing::instrument(skip(users, config))]
async fn authenticate_single_user(users: &dyn UserStore, config: &Settings) -> ServiceResult<Caller> {
    let single_user = config
        .auth
        .single_user
        .as_ref()
        .ok_or(ServiceError::InvalidConfiguration(
            "Single user config is missing".to_string(),
        ))?;

    tracing::debug!(uid = single_user.uid, "Authenticating single user");
    resolve(users, single_user.uid).await
}

#[tracing::instrument(skip(req, users, config))]
async fn authenticate_header(
    req: &salvo::Request,
    users: &dyn UserStore,
    config: &Settings,
) -> ServiceResult<Caller> {
    let header = config.auth.header_name();

    let uid = req
        .headers()
        .get(header)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<UserId>().ok())
        .ok_or(ServiceError::NotAuthenticated)?;

    tracing::debug!(header, uid, "Authenticating from header");
    resolve(users, uid).await
}

/// ## Summary
/// Authenticate a caller based on the configured authentication method.
///
/// ## Errors
/// Returns `NotAuthenticated` when no user can be resolved, `InvalidConfiguration`
/// when the selected method lacks its settings, or the store error.
#[tracing::instrument(skip(req, users, config))]
pub async fn authenticate(
    req: &salvo::Request,
    users: &dyn UserStore,
    config: &Settings,
) -> ServiceResult<Caller> {
    tracing::trace!(auth_method = ?config.auth.method, "Authenticating request");

    match config.auth.method {
        AuthMethod::SingleUser => authenticate_single_user(users, config).await,
        AuthMethod::Header => authenticate_header(req, users, config).await,
    }
}
