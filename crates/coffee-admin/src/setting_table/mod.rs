//! # Setting Table
//!
//! The `settings` table: one JSON value per key. Keys are kept unique by
//! [`SettingClient::upsert`](crate::clients::SettingClient::upsert), which is the
//! only writer.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::SettingClient;
use crate::model::Setting;
use table_actor::TableActor;

/// Creates a new Setting table and its client.
pub fn new(buffer_size: usize) -> (TableActor<Setting>, SettingClient) {
    let (actor, generic_client) = TableActor::new(buffer_size);
    (actor, SettingClient::new(generic_client))
}
