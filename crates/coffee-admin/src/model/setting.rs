/// A key/value application setting.
///
/// Values are free-form JSON so structured settings (the theme colours) and plain
/// strings share one table.
use crate::model::ProfileId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Display;

/// Type-safe identifier for Settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SettingId(pub u32);

impl From<u32> for SettingId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for SettingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "setting_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    pub id: SettingId,
    pub key: String,
    pub value: Value,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<ProfileId>,
}

#[derive(Debug, Clone)]
pub struct SettingInsert {
    pub key: String,
    pub value: Value,
    pub updated_by: Option<ProfileId>,
}

#[derive(Debug, Clone)]
pub struct SettingPatch {
    pub value: Value,
    pub updated_by: Option<ProfileId>,
}
