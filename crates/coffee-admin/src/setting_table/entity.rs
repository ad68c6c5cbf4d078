//! TableRow trait implementation for the Setting domain type.

use crate::model::{Setting, SettingId, SettingInsert, SettingPatch};
use crate::setting_table::SettingError;
use async_trait::async_trait;
use chrono::Utc;
use table_actor::TableRow;

#[async_trait]
impl TableRow for Setting {
    const TABLE: &'static str = "settings";
    type Id = SettingId;
    type Insert = SettingInsert;
    type Patch = SettingPatch;
    type Context = ();
    type Error = SettingError;

    fn from_insert(id: SettingId, row: SettingInsert) -> Result<Self, Self::Error> {
        if row.key.trim().is_empty() {
            return Err(SettingError::EmptyKey);
        }
        Ok(Self {
            id,
            key: row.key,
            value: row.value,
            updated_at: Utc::now(),
            updated_by: row.updated_by,
        })
    }

    async fn on_update(&mut self, patch: SettingPatch, _ctx: &()) -> Result<(), Self::Error> {
        self.value = patch.value;
        self.updated_by = patch.updated_by;
        self.updated_at = Utc::now();
        Ok(())
    }
}
