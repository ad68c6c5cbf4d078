//! # Setting Client
//!
//! High-level API for the `settings` table.
use crate::clients::map_gateway_error;
use crate::model::{ProfileId, Setting, SettingInsert, SettingPatch};
use crate::setting_table::SettingError;
use async_trait::async_trait;
use serde_json::Value;
use table_actor::{GatewayError, Query, TableAccess, TableClient};
use tracing::{debug, instrument};

/// Client for interacting with the Setting table.
#[derive(Clone)]
pub struct SettingClient {
    inner: TableClient<Setting>,
}

impl SettingClient {
    pub fn new(inner: TableClient<Setting>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn list_settings(&self) -> Result<Vec<Setting>, SettingError> {
        self.select(Query::all().order_by(|s: &Setting| s.key.clone()))
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_setting(&self, key: &str) -> Result<Option<Setting>, SettingError> {
        let wanted = key.to_string();
        let found = self
            .select(Query::all().filter(move |s: &Setting| s.key == wanted).limit(1))
            .await?;
        Ok(found.into_iter().next())
    }

    /// Writes `value` under `key`, updating the existing row if there is one.
    #[instrument(skip(self, value))]
    pub async fn upsert(
        &self,
        key: &str,
        value: Value,
        updated_by: Option<ProfileId>,
    ) -> Result<Setting, SettingError> {
        match self.get_setting(key).await? {
            Some(existing) => {
                debug!(id = %existing.id, "Updating setting");
                self.inner
                    .update(existing.id, SettingPatch { value, updated_by })
                    .await
                    .map_err(Self::map_error)
            }
            None => {
                debug!("Inserting setting");
                self.inner
                    .insert(SettingInsert {
                        key: key.to_string(),
                        value,
                        updated_by,
                    })
                    .await
                    .map_err(Self::map_error)
            }
        }
    }
}

#[async_trait]
impl TableAccess<Setting> for SettingClient {
    type Error = SettingError;

    fn inner(&self) -> &TableClient<Setting> {
        &self.inner
    }

    fn map_error(e: GatewayError) -> Self::Error {
        map_gateway_error(e, SettingError::NotFound, SettingError::Gateway)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_upsert_keeps_one_row_per_key() {
        let (actor, settings) = crate::setting_table::new(10);
        tokio::spawn(actor.run(()));

        let first = settings.upsert("currency", json!("$"), None).await.unwrap();
        let second = settings.upsert("currency", json!("€"), None).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.value, json!("€"));
        assert_eq!(settings.list_settings().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_key_is_rejected() {
        let (actor, settings) = crate::setting_table::new(10);
        tokio::spawn(actor.run(()));

        let result = settings.upsert(" ", json!(1), None).await;
        assert_eq!(result.unwrap_err(), SettingError::EmptyKey);
    }
}
