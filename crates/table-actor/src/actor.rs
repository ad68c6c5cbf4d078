//! # Table Actor
//!
//! The server half of a table. It owns the rows and processes [`TableRequest`]s
//! sequentially, so no row is ever touched by two requests at once and the store
//! needs no lock.

use crate::client::TableClient;
use crate::entity::TableRow;
use crate::error::GatewayError;
use crate::message::TableRequest;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that stores the rows of one table.
///
/// # Usage Pattern
///
/// 1. **Create**: `TableActor::new()` returns the actor and its [`TableClient`].
/// 2. **Wire**: pass the row type's dependencies into `actor.run(context)`.
/// 3. **Run**: spawn the run loop in a background task.
///
/// # Operations
///
/// * **Insert**: takes the next id from the sequence, builds the row with
///   `T::from_insert`, runs `on_insert`, stores it and returns it.
/// * **InsertBatch**: stages every row first; if any row is rejected nothing is
///   stored and the sequence is left where it was.
/// * **Get** / **Select**: read-only; select walks rows in id order and then
///   applies the query's ordering and limit.
/// * **Update**: runs `on_update` on a copy and swaps it in only on success.
/// * **Delete**: runs `on_delete`, then removes the row.
pub struct TableActor<T: TableRow> {
    receiver: mpsc::Receiver<TableRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: TableRow> TableActor<T> {
    /// Creates a new table and its client.
    ///
    /// `buffer_size` is the capacity of the request channel; when it is full,
    /// callers wait for space.
    pub fn new(buffer_size: usize) -> (Self, TableClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
        };
        (actor, TableClient::new(sender))
    }

    /// Runs the request loop until every client has been dropped.
    ///
    /// `context` is handed to every row hook.
    pub async fn run(mut self, context: T::Context) {
        let table = T::TABLE;
        info!(table, "Table started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                TableRequest::Insert { row, respond_to } => {
                    debug!(table, ?row, "Insert");
                    let result = self.insert(row, &context).await;
                    let _ = respond_to.send(result);
                }
                TableRequest::InsertBatch { rows, respond_to } => {
                    debug!(table, count = rows.len(), "InsertBatch");
                    let result = self.insert_batch(rows, &context).await;
                    let _ = respond_to.send(result);
                }
                TableRequest::Get { id, respond_to } => {
                    let row = self.store.get(&id).cloned();
                    debug!(table, %id, found = row.is_some(), "Get");
                    let _ = respond_to.send(Ok(row));
                }
                TableRequest::Select { query, respond_to } => {
                    let rows = query.apply(self.store.values());
                    debug!(table, ?query, matched = rows.len(), "Select");
                    let _ = respond_to.send(Ok(rows));
                }
                TableRequest::Update {
                    id,
                    patch,
                    respond_to,
                } => {
                    debug!(table, %id, ?patch, "Update");
                    let result = self.update(id, patch, &context).await;
                    let _ = respond_to.send(result);
                }
                TableRequest::Delete { id, respond_to } => {
                    debug!(table, %id, "Delete");
                    let result = self.delete(id, &context).await;
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(table, size = self.store.len(), "Shutdown");
    }

    async fn build_row(
        id: T::Id,
        row: T::Insert,
        context: &T::Context,
    ) -> Result<T, GatewayError> {
        let mut item = T::from_insert(id, row).map_err(|e| GatewayError::Rejected(Box::new(e)))?;
        item.on_insert(context)
            .await
            .map_err(|e| GatewayError::Rejected(Box::new(e)))?;
        Ok(item)
    }

    async fn insert(&mut self, row: T::Insert, context: &T::Context) -> Result<T, GatewayError> {
        let table = T::TABLE;
        let id = T::Id::from(self.next_id);
        match Self::build_row(id.clone(), row, context).await {
            Ok(item) => {
                self.next_id += 1;
                self.store.insert(id.clone(), item.clone());
                info!(table, %id, size = self.store.len(), "Inserted");
                Ok(item)
            }
            Err(e) => {
                warn!(table, error = %e, "Insert rejected");
                Err(e)
            }
        }
    }

    async fn insert_batch(
        &mut self,
        rows: Vec<T::Insert>,
        context: &T::Context,
    ) -> Result<Vec<T>, GatewayError> {
        let table = T::TABLE;
        let mut next_id = self.next_id;
        let mut staged = Vec::with_capacity(rows.len());

        for row in rows {
            let id = T::Id::from(next_id);
            match Self::build_row(id.clone(), row, context).await {
                Ok(item) => {
                    next_id += 1;
                    staged.push((id, item));
                }
                Err(e) => {
                    warn!(table, %id, error = %e, staged = staged.len(), "Batch rejected");
                    return Err(e);
                }
            }
        }

        self.next_id = next_id;
        let mut inserted = Vec::with_capacity(staged.len());
        for (id, item) in staged {
            self.store.insert(id, item.clone());
            inserted.push(item);
        }
        info!(table, count = inserted.len(), size = self.store.len(), "Batch inserted");
        Ok(inserted)
    }

    async fn update(
        &mut self,
        id: T::Id,
        patch: T::Patch,
        context: &T::Context,
    ) -> Result<T, GatewayError> {
        let table = T::TABLE;
        let Some(current) = self.store.get(&id) else {
            warn!(table, %id, "Not found");
            return Err(GatewayError::NotFound(id.to_string()));
        };

        let mut next = current.clone();
        if let Err(e) = next.on_update(patch, context).await {
            warn!(table, %id, error = %e, "Update rejected");
            return Err(GatewayError::Rejected(Box::new(e)));
        }
        self.store.insert(id.clone(), next.clone());
        info!(table, %id, "Updated");
        Ok(next)
    }

    async fn delete(&mut self, id: T::Id, context: &T::Context) -> Result<(), GatewayError> {
        let table = T::TABLE;
        let Some(item) = self.store.get(&id) else {
            warn!(table, %id, "Not found");
            return Err(GatewayError::NotFound(id.to_string()));
        };

        if let Err(e) = item.on_delete(context).await {
            warn!(table, %id, error = %e, "Delete rejected");
            return Err(GatewayError::Rejected(Box::new(e)));
        }
        self.store.remove(&id);
        info!(table, %id, size = self.store.len(), "Deleted");
        Ok(())
    }
}
