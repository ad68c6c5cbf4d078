//! # Mock Tables & Testing Guide
//!
//! [`MockTable<T>`] hands out a real [`TableClient<T>`] whose requests are answered
//! from a queue of expectations instead of a store. It makes failure paths that are
//! awkward to reach with a real table (a rejected insert, a dropped connection)
//! one line of setup, and it counts every request it receives.
//!
//! ## When to use Mocks vs Real Tables
//!
//! | Feature | MockTable | Real TableActor |
//! |---------|-----------|-----------------|
//! | **State** | None (scripted answers) | Real rows |
//! | **Error injection** | `return_err` | Requires a row that fails validation |
//! | **Call counting** | `calls()` | Not available |
//! | **Use case** | Orchestration logic around clients | Table behaviour, end-to-end flows |
//!
//! ## Failure injection
//!
//! ```rust
//! use table_actor::mock::MockTable;
//! use table_actor::{GatewayError, TableRow};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Cup { id: u32 }
//! #[derive(Debug)] struct CupInsert;
//! #[derive(Debug, thiserror::Error)] #[error("cup error")] struct CupError;
//!
//! #[async_trait]
//! impl TableRow for Cup {
//!     const TABLE: &'static str = "cups";
//!     type Id = u32; type Insert = CupInsert; type Patch = ();
//!     type Context = (); type Error = CupError;
//!     fn from_insert(id: u32, _: CupInsert) -> Result<Self, Self::Error> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockTable::<Cup>::new();
//!     mock.expect_insert().return_err(GatewayError::rejected("disk full"));
//!
//!     let result = mock.client().insert(CupInsert).await;
//!     assert!(matches!(result, Err(GatewayError::Rejected(_))));
//!     assert_eq!(mock.calls(), 1);
//!     mock.verify();
//! }
//! ```
//!
//! ## Inspecting payloads
//!
//! When a test needs to look at what was sent, use [`mock_table`] and the `next_*`
//! helpers: they hand back the payload together with the responder.

use crate::client::TableClient;
use crate::entity::TableRow;
use crate::error::GatewayError;
use crate::message::TableRequest;
use crate::query::Query;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// A scripted answer for the next request of a given kind.
enum Expectation<T: TableRow> {
    Insert(Result<T, GatewayError>),
    InsertBatch(Result<Vec<T>, GatewayError>),
    Get(Result<Option<T>, GatewayError>),
    Select(Result<Vec<T>, GatewayError>),
    Update(Result<T, GatewayError>),
    Delete(Result<(), GatewayError>),
}

impl<T: TableRow> Expectation<T> {
    fn kind(&self) -> &'static str {
        match self {
            Expectation::Insert(_) => "insert",
            Expectation::InsertBatch(_) => "insert_batch",
            Expectation::Get(_) => "get",
            Expectation::Select(_) => "select",
            Expectation::Update(_) => "update",
            Expectation::Delete(_) => "delete",
        }
    }
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock table with expectation tracking and call counting.
///
/// Expectations are consumed in the order they were declared. A request that does
/// not match the next expectation (or arrives when none is left) is answered with
/// `GatewayError::Rejected` and recorded; [`MockTable::verify`] then fails.
pub struct MockTable<T: TableRow> {
    client: TableClient<T>,
    expectations: Expectations<T>,
    calls: Arc<AtomicUsize>,
    unexpected: Arc<Mutex<Vec<String>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: TableRow> Default for MockTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TableRow> MockTable<T> {
    /// Creates a mock table with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<TableRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let calls = Arc::new(AtomicUsize::new(0));
        let unexpected = Arc::new(Mutex::new(Vec::new()));

        let task_expectations = expectations.clone();
        let task_calls = calls.clone();
        let task_unexpected = unexpected.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                task_calls.fetch_add(1, Ordering::SeqCst);
                let expectation = task_expectations
                    .lock()
                    .expect("expectation lock poisoned")
                    .pop_front();

                let mismatch = match (request, expectation) {
                    (TableRequest::Insert { respond_to, .. }, Some(Expectation::Insert(r))) => {
                        let _ = respond_to.send(r);
                        None
                    }
                    (
                        TableRequest::InsertBatch { respond_to, .. },
                        Some(Expectation::InsertBatch(r)),
                    ) => {
                        let _ = respond_to.send(r);
                        None
                    }
                    (TableRequest::Get { respond_to, .. }, Some(Expectation::Get(r))) => {
                        let _ = respond_to.send(r);
                        None
                    }
                    (TableRequest::Select { respond_to, .. }, Some(Expectation::Select(r))) => {
                        let _ = respond_to.send(r);
                        None
                    }
                    (TableRequest::Update { respond_to, .. }, Some(Expectation::Update(r))) => {
                        let _ = respond_to.send(r);
                        None
                    }
                    (TableRequest::Delete { respond_to, .. }, Some(Expectation::Delete(r))) => {
                        let _ = respond_to.send(r);
                        None
                    }
                    (request, expectation) => {
                        let note = format!(
                            "{} request, expected {}",
                            request.kind(),
                            expectation.as_ref().map_or("nothing", |e| e.kind())
                        );
                        reject(request, &note);
                        Some(note)
                    }
                };

                if let Some(note) = mismatch {
                    task_unexpected
                        .lock()
                        .expect("mismatch lock poisoned")
                        .push(note);
                }
            }
        });

        Self {
            client: TableClient::new(sender),
            expectations,
            calls,
            unexpected,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> TableClient<T> {
        self.client.clone()
    }

    /// Number of requests received so far, matched or not.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn push(&self, expectation: Expectation<T>) {
        self.expectations
            .lock()
            .expect("expectation lock poisoned")
            .push_back(expectation);
    }

    /// Expects an `insert`.
    pub fn expect_insert(&mut self) -> ExpectationBuilder<'_, T, T> {
        ExpectationBuilder::new(self, Expectation::Insert)
    }

    /// Expects an `insert_batch`.
    pub fn expect_insert_batch(&mut self) -> ExpectationBuilder<'_, T, Vec<T>> {
        ExpectationBuilder::new(self, Expectation::InsertBatch)
    }

    /// Expects a `get`.
    pub fn expect_get(&mut self) -> ExpectationBuilder<'_, T, Option<T>> {
        ExpectationBuilder::new(self, Expectation::Get)
    }

    /// Expects a `select`.
    pub fn expect_select(&mut self) -> ExpectationBuilder<'_, T, Vec<T>> {
        ExpectationBuilder::new(self, Expectation::Select)
    }

    /// Expects an `update`.
    pub fn expect_update(&mut self) -> ExpectationBuilder<'_, T, T> {
        ExpectationBuilder::new(self, Expectation::Update)
    }

    /// Expects a `delete`.
    pub fn expect_delete(&mut self) -> ExpectationBuilder<'_, T, ()> {
        ExpectationBuilder::new(self, Expectation::Delete)
    }

    /// Panics unless every expectation was consumed and no request was unexpected.
    pub fn verify(&self) {
        let unexpected = self.unexpected.lock().expect("mismatch lock poisoned");
        if !unexpected.is_empty() {
            panic!("Unexpected requests: {:?}", *unexpected);
        }
        let remaining = self.expectations.lock().expect("expectation lock poisoned");
        if !remaining.is_empty() {
            panic!("Not all expectations were met. {} remaining", remaining.len());
        }
    }
}

/// Answers a request that had no matching expectation.
fn reject<T: TableRow>(request: TableRequest<T>, note: &str) {
    let error = || GatewayError::rejected(format!("mock: unexpected {note}"));
    match request {
        TableRequest::Insert { respond_to, .. } => {
            let _ = respond_to.send(Err(error()));
        }
        TableRequest::InsertBatch { respond_to, .. } => {
            let _ = respond_to.send(Err(error()));
        }
        TableRequest::Get { respond_to, .. } => {
            let _ = respond_to.send(Err(error()));
        }
        TableRequest::Select { respond_to, .. } => {
            let _ = respond_to.send(Err(error()));
        }
        TableRequest::Update { respond_to, .. } => {
            let _ = respond_to.send(Err(error()));
        }
        TableRequest::Delete { respond_to, .. } => {
            let _ = respond_to.send(Err(error()));
        }
    }
}

/// Builder for one expectation; finish it with `return_ok` or `return_err`.
pub struct ExpectationBuilder<'a, T: TableRow, R> {
    mock: &'a MockTable<T>,
    wrap: fn(Result<R, GatewayError>) -> Expectation<T>,
}

impl<'a, T: TableRow, R> ExpectationBuilder<'a, T, R> {
    fn new(mock: &'a MockTable<T>, wrap: fn(Result<R, GatewayError>) -> Expectation<T>) -> Self {
        Self { mock, wrap }
    }

    /// The request succeeds with `value`.
    pub fn return_ok(self, value: R) {
        self.mock.push((self.wrap)(Ok(value)));
    }

    /// The request fails with `error`.
    pub fn return_err(self, error: GatewayError) {
        self.mock.push((self.wrap)(Err(error)));
    }
}

// =============================================================================
// RECEIVER-LEVEL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// The test plays the table: it pulls requests with the `next_*` helpers, inspects
/// the payloads, and answers through the returned responder.
pub fn mock_table<T: TableRow>(
    buffer_size: usize,
) -> (TableClient<T>, mpsc::Receiver<TableRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (TableClient::new(sender), receiver)
}

type Responder<R> = oneshot::Sender<Result<R, GatewayError>>;

/// Next request, if it is an Insert.
pub async fn next_insert<T: TableRow>(
    receiver: &mut mpsc::Receiver<TableRequest<T>>,
) -> Option<(T::Insert, Responder<T>)> {
    match receiver.recv().await {
        Some(TableRequest::Insert { row, respond_to }) => Some((row, respond_to)),
        _ => None,
    }
}

/// Next request, if it is an InsertBatch.
pub async fn next_insert_batch<T: TableRow>(
    receiver: &mut mpsc::Receiver<TableRequest<T>>,
) -> Option<(Vec<T::Insert>, Responder<Vec<T>>)> {
    match receiver.recv().await {
        Some(TableRequest::InsertBatch { rows, respond_to }) => Some((rows, respond_to)),
        _ => None,
    }
}

/// Next request, if it is a Get.
pub async fn next_get<T: TableRow>(
    receiver: &mut mpsc::Receiver<TableRequest<T>>,
) -> Option<(T::Id, Responder<Option<T>>)> {
    match receiver.recv().await {
        Some(TableRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next request, if it is a Select.
pub async fn next_select<T: TableRow>(
    receiver: &mut mpsc::Receiver<TableRequest<T>>,
) -> Option<(Query<T>, Responder<Vec<T>>)> {
    match receiver.recv().await {
        Some(TableRequest::Select { query, respond_to }) => Some((query, respond_to)),
        _ => None,
    }
}

/// Next request, if it is an Update.
pub async fn next_update<T: TableRow>(
    receiver: &mut mpsc::Receiver<TableRequest<T>>,
) -> Option<(T::Id, T::Patch, Responder<T>)> {
    match receiver.recv().await {
        Some(TableRequest::Update {
            id,
            patch,
            respond_to,
        }) => Some((id, patch, respond_to)),
        _ => None,
    }
}

/// Next request, if it is a Delete.
pub async fn next_delete<T: TableRow>(
    receiver: &mut mpsc::Receiver<TableRequest<T>>,
) -> Option<(T::Id, Responder<()>)> {
    match receiver.recv().await {
        Some(TableRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}
