//! # Table Client
//!
//! The caller side of a table: forwards requests over the table's mpsc channel and
//! awaits the answer on a oneshot channel.

use crate::entity::TableRow;
use crate::error::GatewayError;
use crate::message::TableRequest;
use crate::query::Query;
use tokio::sync::{mpsc, oneshot};

/// A type-safe, cloneable handle to a [`TableActor`](crate::TableActor).
///
/// Holds only a sender, so clones are cheap and can be shared across tasks.
pub struct TableClient<T: TableRow> {
    sender: mpsc::Sender<TableRequest<T>>,
}

impl<T: TableRow> Clone for TableClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: TableRow> TableClient<T> {
    pub fn new(sender: mpsc::Sender<TableRequest<T>>) -> Self {
        Self { sender }
    }

    pub fn table(&self) -> &'static str {
        T::TABLE
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, GatewayError>>) -> TableRequest<T>,
    ) -> Result<R, GatewayError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| GatewayError::TableClosed)?;
        response.await.map_err(|_| GatewayError::ResponseDropped)?
    }

    /// Inserts one row and returns it as stored.
    pub async fn insert(&self, row: T::Insert) -> Result<T, GatewayError> {
        self.request(|respond_to| TableRequest::Insert { row, respond_to })
            .await
    }

    /// Inserts all rows or none of them.
    pub async fn insert_batch(&self, rows: Vec<T::Insert>) -> Result<Vec<T>, GatewayError> {
        self.request(|respond_to| TableRequest::InsertBatch { rows, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, GatewayError> {
        self.request(|respond_to| TableRequest::Get { id, respond_to })
            .await
    }

    pub async fn select(&self, query: Query<T>) -> Result<Vec<T>, GatewayError> {
        self.request(|respond_to| TableRequest::Select { query, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, GatewayError> {
        self.request(|respond_to| TableRequest::Update {
            id,
            patch,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), GatewayError> {
        self.request(|respond_to| TableRequest::Delete { id, respond_to })
            .await
    }
}
