//! # Profile Client
//!
//! High-level API for the `profiles` table (the Users screen).
use crate::clients::map_gateway_error;
use crate::model::{Profile, ProfileId, ProfileInsert, ProfilePatch};
use crate::profile_table::ProfileError;
use async_trait::async_trait;
use table_actor::{GatewayError, Query, TableAccess, TableClient};
use tracing::{debug, instrument};

/// Client for interacting with the Profile table.
#[derive(Clone)]
pub struct ProfileClient {
    inner: TableClient<Profile>,
}

impl ProfileClient {
    pub fn new(inner: TableClient<Profile>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_profile(&self, row: ProfileInsert) -> Result<Profile, ProfileError> {
        debug!("Sending request");
        self.inner.insert(row).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_profile(
        &self,
        id: ProfileId,
        patch: ProfilePatch,
    ) -> Result<Profile, ProfileError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(Self::map_error)
    }

    /// All profiles, newest first.
    #[instrument(skip(self))]
    pub async fn list_profiles(&self) -> Result<Vec<Profile>, ProfileError> {
        self.select(Query::all().order_by_desc(|p: &Profile| (p.created_at, p.id)))
            .await
    }

    /// Case-insensitive lookup by email.
    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Profile>, ProfileError> {
        let wanted = email.trim().to_lowercase();
        let found = self
            .select(Query::all().filter(move |p: &Profile| p.email == wanted).limit(1))
            .await?;
        Ok(found.into_iter().next())
    }
}

#[async_trait]
impl TableAccess<Profile> for ProfileClient {
    type Error = ProfileError;

    fn inner(&self) -> &TableClient<Profile> {
        &self.inner
    }

    fn map_error(e: GatewayError) -> Self::Error {
        map_gateway_error(e, ProfileError::NotFound, ProfileError::Gateway)
    }
}
