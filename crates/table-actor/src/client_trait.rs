//! # TableAccess Trait
//!
//! Common read/delete operations for domain clients that wrap a [`TableClient`].
use crate::{GatewayError, Query, TableClient, TableRow};
use async_trait::async_trait;

/// Trait for table-specific clients to inherit the generic reads.
///
/// A domain client supplies its inner [`TableClient`] and a mapping from
/// [`GatewayError`] into its own error type; `get`, `select` and `delete` come for
/// free.
///
/// # Example
///
/// ```rust
/// use table_actor::{GatewayError, TableAccess, TableClient, TableRow};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Cup { id: u32 }
/// #[derive(Debug)] struct CupInsert;
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct CupError(String);
///
/// impl From<String> for CupError {
///     fn from(s: String) -> Self { CupError(s) }
/// }
///
/// #[async_trait]
/// impl TableRow for Cup {
///     const TABLE: &'static str = "cups";
///     type Id = u32; type Insert = CupInsert; type Patch = ();
///     type Context = (); type Error = CupError;
///     fn from_insert(id: u32, _: CupInsert) -> Result<Self, Self::Error> { Ok(Self { id }) }
///     async fn on_update(&mut self, _: (), _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// struct CupClient { inner: TableClient<Cup> }
///
/// #[async_trait]
/// impl TableAccess<Cup> for CupClient {
///     type Error = CupError;
///     fn inner(&self) -> &TableClient<Cup> { &self.inner }
///     fn map_error(e: GatewayError) -> Self::Error { CupError(e.to_string()) }
/// }
///
/// async fn usage(client: CupClient) {
///     // get(), select() and delete() are provided
///     let _ = client.get(1).await;
///     let _ = client.delete(1).await;
/// }
/// ```
#[async_trait]
pub trait TableAccess<T: TableRow>: Send + Sync {
    /// The table-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic TableClient.
    fn inner(&self) -> &TableClient<T>;

    /// Map gateway errors to the table-specific error type.
    fn map_error(e: GatewayError) -> Self::Error;

    /// Fetch a row by id.
    #[tracing::instrument(skip(self), fields(table = T::TABLE))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every row matching `query`.
    #[tracing::instrument(skip(self, query), fields(table = T::TABLE))]
    async fn select(&self, query: Query<T>) -> Result<Vec<T>, Self::Error> {
        tracing::debug!(?query, "Sending request");
        self.inner().select(query).await.map_err(Self::map_error)
    }

    /// Delete a row by id.
    #[tracing::instrument(skip(self), fields(table = T::TABLE))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
