//! # Table Actor
//!
//! A table-oriented data gateway built on the **Actor Model**. Every table is a
//! [`TableActor`] running in its own Tokio task: it owns its rows, processes
//! requests one at a time, and answers through oneshot channels. Callers talk to
//! it through a cheap, cloneable [`TableClient`].
//!
//! ## Why a table per actor?
//!
//! The dashboard speaks to its data service in a very small vocabulary:
//!
//! - `select(filter, order, limit)` returning a row set
//! - `insert(row)` / `insert_batch(rows)` returning the inserted rows
//! - `update(id, patch)` and `delete(id)` returning an acknowledgement or an error
//!
//! Modelling each table as an actor gives that vocabulary a single generic
//! implementation, keeps row state free of locks, and lets tests swap any table
//! for a [`mock::MockTable`] with injected failures.
//!
//! ## Architecture Overview
//!
//! 1. **Row Layer** ([`TableRow`]) - the row type, its payloads and validation hooks
//! 2. **Runtime Layer** ([`TableActor`]) - request processing and storage
//! 3. **Interface Layer** ([`TableClient`], [`TableAccess`]) - typed requests
//!
//! ## Example
//!
//! ```rust
//! use table_actor::{Query, TableActor, TableRow};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Bean { id: u32, origin: String, grams: u32 }
//!
//! #[derive(Debug)] struct BeanInsert { origin: String, grams: u32 }
//! #[derive(Debug)] struct BeanPatch { grams: u32 }
//! #[derive(Debug, thiserror::Error)] #[error("bean rejected")] struct BeanError;
//!
//! #[async_trait]
//! impl TableRow for Bean {
//!     const TABLE: &'static str = "beans";
//!     type Id = u32;
//!     type Insert = BeanInsert;
//!     type Patch = BeanPatch;
//!     type Context = ();
//!     type Error = BeanError;
//!
//!     fn from_insert(id: u32, row: BeanInsert) -> Result<Self, Self::Error> {
//!         Ok(Self { id, origin: row.origin, grams: row.grams })
//!     }
//!
//!     async fn on_update(&mut self, patch: BeanPatch, _: &()) -> Result<(), Self::Error> {
//!         self.grams = patch.grams;
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = TableActor::<Bean>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     client.insert(BeanInsert { origin: "Huila".into(), grams: 250 }).await.unwrap();
//!     client.insert(BeanInsert { origin: "Sidamo".into(), grams: 500 }).await.unwrap();
//!
//!     let heavy = client
//!         .select(Query::all().filter(|b: &Bean| b.grams > 300))
//!         .await
//!         .unwrap();
//!     assert_eq!(heavy.len(), 1);
//!     assert_eq!(heavy[0].origin, "Sidamo");
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - Each table runs in its own Tokio task
//! - Requests are processed **sequentially** within a table
//! - Separate tables run in parallel; nothing spans two tables atomically
//!
//! ## Testing
//!
//! See the [`mock`] module for the expectation-based test double and the
//! receiver-level helpers used to inspect request payloads.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod query;
pub mod telemetry;

pub use actor::TableActor;
pub use client::TableClient;
pub use client_trait::TableAccess;
pub use entity::TableRow;
pub use error::GatewayError;
pub use message::{Response, TableRequest};
pub use query::Query;
