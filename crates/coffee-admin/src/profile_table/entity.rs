//! TableRow trait implementation for the Profile domain type.

use crate::model::{Profile, ProfileId, ProfileInsert, ProfilePatch};
use crate::profile_table::ProfileError;
use async_trait::async_trait;
use chrono::Utc;
use table_actor::TableRow;

#[async_trait]
impl TableRow for Profile {
    const TABLE: &'static str = "profiles";
    type Id = ProfileId;
    type Insert = ProfileInsert;
    type Patch = ProfilePatch;
    type Context = ();
    type Error = ProfileError;

    fn from_insert(id: ProfileId, row: ProfileInsert) -> Result<Self, Self::Error> {
        if row.full_name.trim().is_empty() {
            return Err(ProfileError::EmptyName);
        }
        let email = row.email.trim().to_lowercase();
        if !email.contains('@') {
            return Err(ProfileError::InvalidEmail(row.email));
        }
        let now = Utc::now();
        Ok(Self {
            id,
            email,
            full_name: row.full_name,
            role: row.role,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        })
    }

    async fn on_update(&mut self, patch: ProfilePatch, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(full_name) = patch.full_name {
            if full_name.trim().is_empty() {
                return Err(ProfileError::EmptyName);
            }
            self.full_name = full_name;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(avatar_url) = patch.avatar_url {
            self.avatar_url = Some(avatar_url);
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;

    #[test]
    fn test_email_is_normalized_and_checked() {
        let row = ProfileInsert {
            email: " Barista@Example.com ".to_string(),
            full_name: "Ana".to_string(),
            role: Role::Staff,
        };
        let profile = Profile::from_insert(ProfileId(1), row).unwrap();
        assert_eq!(profile.email, "barista@example.com");

        let row = ProfileInsert {
            email: "nobody".to_string(),
            full_name: "Ana".to_string(),
            role: Role::Staff,
        };
        assert!(matches!(
            Profile::from_insert(ProfileId(2), row),
            Err(ProfileError::InvalidEmail(_))
        ));
    }
}
