//! Transaction helper for multi-statement writes.
//!
//! ```rust,ignore
//! use diesel_async::scoped_futures::ScopedFutureExt;
//! use crate::db::transaction::with_transaction;
//!
//! with_transaction(&mut conn, |tx| async move {
//!     group::insert_group(tx, &row).await?;
//!     group::insert_members(tx, &members).await?;
//!     Ok(())
//! }.scope_boxed()).await?;
//! ```

use diesel_async::{AsyncConnection, AsyncPgConnection, scoped_futures::ScopedBoxFuture};

use crate::error::{DbError, DbResult};

/// ## Summary
/// Runs a database transaction and returns the closure result.
///
/// ## Errors
/// Returns any error produced by the closure, or errors raised while starting
/// or committing the transaction.
pub async fn with_transaction<'a, T, F>(conn: &mut AsyncPgConnection, callback: F) -> DbResult<T>
where
    F: for<'r> FnOnce(&'r mut AsyncPgConnection) -> ScopedBoxFuture<'a, 'r, DbResult<T>>
        + Send
        + 'a,
    T: Send + 'a,
{
    conn.transaction::<_, DbError, _>(callback).await
}
