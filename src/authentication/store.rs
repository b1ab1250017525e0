use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Context;
use secrecy::Secret;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::password::compute_password_hash;
use crate::telemetry::spawn_blocking_with_tracing;

#[derive(Clone, Debug)]
pub struct User {
    pub user_id: Uuid,
    pub username: String,
    pub password_hash: Secret<String>,
    pub email_verified: bool,
}

/// In-memory user and credential store shared across request handlers.
#[derive(Clone, Default)]
pub struct UserStore {
    inner: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new user, hashing the password off the async runtime.
    #[tracing::instrument(name = "Register user", skip(self, password))]
    pub async fn register(
        &self,
        username: &str,
        password: Secret<String>,
        email_verified: bool,
    ) -> Result<Uuid, anyhow::Error> {
        let password_hash = spawn_blocking_with_tracing(move || compute_password_hash(password))
            .await
            .context("Failed to spawn blocking task.")?
            .context("Failed to hash password")?;

        let mut users = self.inner.write().await;
        if users.values().any(|user| user.username == username) {
            anyhow::bail!("Username {username} is already taken.");
        }
        let user_id = Uuid::new_v4();
        users.insert(
            user_id,
            User {
                user_id,
                username: username.to_owned(),
                password_hash,
                email_verified,
            },
        );
        Ok(user_id)
    }

    pub async fn stored_credentials(&self, username: &str) -> Option<(Uuid, Secret<String>)> {
        self.inner
            .read()
            .await
            .values()
            .find(|user| user.username == username)
            .map(|user| (user.user_id, user.password_hash.clone()))
    }

    #[tracing::instrument(name = "Get username", skip(self))]
    pub async fn username(&self, user_id: Uuid) -> Result<String, anyhow::Error> {
        self.inner
            .read()
            .await
            .get(&user_id)
            .map(|user| user.username.clone())
            .with_context(|| format!("No user found for id {user_id}."))
    }

    pub async fn is_verified(&self, user_id: Uuid) -> bool {
        self.inner
            .read()
            .await
            .get(&user_id)
            .map(|user| user.email_verified)
            .unwrap_or(false)
    }
}
