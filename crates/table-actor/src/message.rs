//! # Table Requests
//!
//! Message types exchanged between [`TableClient`](crate::TableClient) and
//! [`TableActor`](crate::TableActor).

use crate::entity::TableRow;
use crate::error::GatewayError;
use crate::query::Query;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by tables.
pub type Response<T> = oneshot::Sender<Result<T, GatewayError>>;

/// Request sent to a table.
///
/// The variants mirror the data service contract the dashboard relies on:
///
/// - **Insert** / **InsertBatch**: create rows from [`TableRow::Insert`] payloads and
///   return the stored rows (with their generated ids). A batch is all-or-nothing.
/// - **Get**: fetch one row by id.
/// - **Select**: fetch every row matching a [`Query`].
/// - **Update**: apply a [`TableRow::Patch`] to one row and return the new state.
/// - **Delete**: remove one row.
#[derive(Debug)]
pub enum TableRequest<T: TableRow> {
    Insert {
        row: T::Insert,
        respond_to: Response<T>,
    },
    InsertBatch {
        rows: Vec<T::Insert>,
        respond_to: Response<Vec<T>>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Select {
        query: Query<T>,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
}

impl<T: TableRow> TableRequest<T> {
    /// Short operation name, used in logs and mock diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            TableRequest::Insert { .. } => "insert",
            TableRequest::InsertBatch { .. } => "insert_batch",
            TableRequest::Get { .. } => "get",
            TableRequest::Select { .. } => "select",
            TableRequest::Update { .. } => "update",
            TableRequest::Delete { .. } => "delete",
        }
    }
}
