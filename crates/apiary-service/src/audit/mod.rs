//! Activity log port.

use chrono::Utc;
use salvo::async_trait;

use apiary_core::model::{AuditKind, NewAuditEntry};
use apiary_core::types::GroupId;

use crate::auth::Caller;
use crate::error::ServiceResult;

#[async_trait]
pub trait AuditSink: Send + Sync {
    /// ## Errors
    /// Returns the store error if the entry cannot be persisted.
    async fn record(&self, entry: &NewAuditEntry) -> ServiceResult<()>;
}

/// ## Summary
/// Builds a group activity entry authored by `caller` at the current time.
#[must_use]
pub fn group_entry(caller: &Caller, group_id: GroupId, content: String) -> NewAuditEntry {
    NewAuditEntry {
        content,
        kind: AuditKind::Group,
        uid: caller.uid,
        username: caller.username.clone(),
        typeid: group_id,
        add_time: Utc::now(),
    }
}

/// ## Summary
/// Records an entry, logging instead of failing when the sink errors.
pub async fn record_quietly(sink: &dyn AuditSink, entry: NewAuditEntry) {
    if let Err(e) = sink.record(&entry).await {
        tracing::warn!(error = %e, typeid = entry.typeid, "Failed to record activity entry");
    }
}
