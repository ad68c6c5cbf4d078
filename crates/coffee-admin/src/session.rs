//! # Session & Identity
//!
//! Who is signed in. Operations that record an author (order submission, settings
//! saves) take an [`Identity`] argument; nothing reads the session ambiently.
//!
//! [`LocalSessionProvider`] keeps credentials in memory next to the `profiles`
//! table. Passwords are never stored: each account keeps a per-account salt and
//! the SHA3-256 digest of `salt:password`.

use crate::clients::ProfileClient;
use crate::model::{Profile, ProfileId, ProfileInsert, Role};
use crate::profile_table::ProfileError;
use async_trait::async_trait;
use rand::Rng;
use sha3::{Digest, Sha3_256};
use std::collections::HashMap;
use table_actor::TableAccess;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

/// Shortest accepted password, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// The signed-in user as other components see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: ProfileId,
    pub email: String,
    pub full_name: String,
    pub role: Role,
}

impl From<&Profile> for Identity {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id,
            email: profile.email.clone(),
            full_name: profile.full_name.clone(),
            role: profile.role,
        }
    }
}

/// Account details for [`SessionProvider::sign_up`].
#[derive(Debug, Clone)]
pub struct SignUp {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    #[error("Password must be at least {} characters", MIN_PASSWORD_LEN)]
    PasswordTooShort,

    #[error("An account already exists for {0}")]
    EmailTaken(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error(transparent)]
    Profile(#[from] ProfileError),
}

#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn current_user(&self) -> Option<Identity>;

    /// Verifies the credentials and makes the account the current user.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, SessionError>;

    /// Registers an account and its profile. The current session is unchanged,
    /// so an admin can add staff without being signed out.
    async fn sign_up(&self, account: SignUp) -> Result<Identity, SessionError>;

    async fn sign_out(&self);
}

#[derive(Debug, Clone)]
struct Credential {
    profile_id: ProfileId,
    salt: String,
    digest: String,
}

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha3_256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// 16 random bytes, hex encoded.
fn fresh_salt() -> String {
    hex::encode(rand::rng().random::<[u8; 16]>())
}

/// Session provider backed by the `profiles` table.
pub struct LocalSessionProvider {
    profiles: ProfileClient,
    credentials: RwLock<HashMap<String, Credential>>,
    current: RwLock<Option<Identity>>,
}

impl LocalSessionProvider {
    pub fn new(profiles: ProfileClient) -> Self {
        Self {
            profiles,
            credentials: RwLock::new(HashMap::new()),
            current: RwLock::new(None),
        }
    }
}

#[async_trait]
impl SessionProvider for LocalSessionProvider {
    async fn current_user(&self) -> Option<Identity> {
        self.current.read().await.clone()
    }

    #[instrument(skip(self, password))]
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, SessionError> {
        let email = email.trim().to_lowercase();
        let credential = self.credentials.read().await.get(&email).cloned();
        let Some(credential) = credential else {
            warn!("Unknown account");
            return Err(SessionError::InvalidCredentials);
        };
        if digest(&credential.salt, password) != credential.digest {
            warn!("Wrong password");
            return Err(SessionError::InvalidCredentials);
        }

        let profile = self
            .profiles
            .get(credential.profile_id)
            .await?
            .ok_or(SessionError::InvalidCredentials)?;
        let identity = Identity::from(&profile);
        *self.current.write().await = Some(identity.clone());
        info!(id = %identity.id, role = %identity.role, "Signed in");
        Ok(identity)
    }

    #[instrument(skip(self, account), fields(email = %account.email))]
    async fn sign_up(&self, account: SignUp) -> Result<Identity, SessionError> {
        if account.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(SessionError::PasswordTooShort);
        }
        let email = account.email.trim().to_lowercase();

        // held across the profile insert so two sign-ups cannot race for one email
        let mut credentials = self.credentials.write().await;
        if credentials.contains_key(&email) || self.profiles.find_by_email(&email).await?.is_some() {
            return Err(SessionError::EmailTaken(email));
        }

        let profile = self
            .profiles
            .create_profile(ProfileInsert {
                email: email.clone(),
                full_name: account.full_name,
                role: account.role,
            })
            .await?;

        let salt = fresh_salt();
        let digest = digest(&salt, &account.password);
        credentials.insert(
            email,
            Credential {
                profile_id: profile.id,
                salt,
                digest,
            },
        );
        info!(id = %profile.id, role = %profile.role, "Account created");
        Ok(Identity::from(&profile))
    }

    async fn sign_out(&self) {
        if let Some(identity) = self.current.write().await.take() {
            info!(id = %identity.id, "Signed out");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> LocalSessionProvider {
        let (actor, profiles) = crate::profile_table::new(10);
        tokio::spawn(actor.run(()));
        LocalSessionProvider::new(profiles)
    }

    fn account(email: &str, password: &str) -> SignUp {
        SignUp {
            email: email.to_string(),
            password: password.to_string(),
            full_name: "Sam Rivera".to_string(),
            role: Role::Manager,
        }
    }

    #[test]
    fn test_digest_is_salted() {
        assert_ne!(digest("a", "secret"), digest("b", "secret"));
        assert_eq!(digest("a", "secret").len(), 64);
    }

    #[test]
    fn test_salts_are_random_per_account() {
        let first = fresh_salt();
        let second = fresh_salt();
        assert_eq!(first.len(), 32);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_sign_up_then_sign_in() {
        let session = provider();
        let created = session
            .sign_up(account("sam@cafe.test", "espresso"))
            .await
            .unwrap();
        assert_eq!(created.role, Role::Manager);
        assert_eq!(session.current_user().await, None);

        let signed_in = session.sign_in("SAM@cafe.test", "espresso").await.unwrap();
        assert_eq!(signed_in, created);
        assert_eq!(session.current_user().await, Some(created));

        session.sign_out().await;
        assert_eq!(session.current_user().await, None);
    }

    #[tokio::test]
    async fn test_sign_up_rules() {
        let session = provider();
        assert_eq!(
            session.sign_up(account("sam@cafe.test", "short")).await,
            Err(SessionError::PasswordTooShort)
        );

        session.sign_up(account("sam@cafe.test", "espresso")).await.unwrap();
        assert_eq!(
            session.sign_up(account("Sam@Cafe.test", "ristretto")).await,
            Err(SessionError::EmailTaken("sam@cafe.test".to_string()))
        );
    }

    #[tokio::test]
    async fn test_wrong_password_is_rejected() {
        let session = provider();
        session.sign_up(account("sam@cafe.test", "espresso")).await.unwrap();

        assert_eq!(
            session.sign_in("sam@cafe.test", "Espresso").await,
            Err(SessionError::InvalidCredentials)
        );
        assert_eq!(
            session.sign_in("nobody@cafe.test", "espresso").await,
            Err(SessionError::InvalidCredentials)
        );
        assert_eq!(session.current_user().await, None);
    }
}
