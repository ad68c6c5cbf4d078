//! # Profile Table
//!
//! The `profiles` table: staff accounts and their roles.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::ProfileClient;
use crate::model::Profile;
use table_actor::TableActor;

/// Creates a new Profile table and its client.
pub fn new(buffer_size: usize) -> (TableActor<Profile>, ProfileClient) {
    let (actor, generic_client) = TableActor::new(buffer_size);
    (actor, ProfileClient::new(generic_client))
}
