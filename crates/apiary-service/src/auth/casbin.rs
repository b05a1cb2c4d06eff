use casbin::{CoreApi, MgmtApi};
use string_adapter::StringAdapter;

use crate::error::ServiceResult;

const MODEL: &str = include_str!("casbin_model.conf");
const POLICY: &str = include_str!("casbin_policy.csv");

/// ## Summary
/// Initialize a Casbin enforcer from the embedded role model and policy.
///
/// The policy grants `view` to guests, `edit` to developers and `danger` to
/// owners, with `admin ⊃ owner ⊃ dev ⊃ guest` as role inheritance.
///
/// ## Errors
/// Returns an error if the model or policy cannot be loaded.
#[tracing::instrument]
pub async fn init_casbin() -> ServiceResult<casbin::Enforcer> {
    tracing::debug!("Initializing Casbin enforcer");

    let model = casbin::DefaultModel::from_str(MODEL).await?;
    tracing::debug!("Casbin model loaded");

    let adapter = StringAdapter::new(POLICY);

    let enforcer = casbin::Enforcer::new(model, adapter).await?;

    let policy_count = enforcer.get_policy().len();
    let grouping_count = enforcer.get_grouping_policy().len();
    tracing::info!(
        policy_count = policy_count,
        grouping_count = grouping_count,
        "Casbin enforcer initialized successfully"
    );
    Ok(enforcer)
}
