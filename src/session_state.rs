use std::ops::{Deref, DerefMut};

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_sessions::async_session::Session;
use axum_sessions::extractors::WritableSession;
use uuid::Uuid;

use crate::authentication::Guard;

/// A type-safe wrapper for the `axum_sessions::extractors::WritableSession`.
pub struct TypedSession(WritableSession);

impl TypedSession {
    const CSRF_TOKEN_KEY: &'static str = "_token";
    pub(crate) const PASSWORD_CONFIRMED_AT_KEY: &'static str = "auth.password_confirmed_at";

    /// Generates a new id and cookie for this session, keeping its data.
    ///
    /// Returns the record for the old identifier. Stored sessions share
    /// their state, so the caller must purge that record from the session
    /// store or the old identifier keeps resolving to the live session.
    #[must_use]
    pub fn renew(&mut self) -> Session {
        let stale = (*self.0).clone();
        self.0.regenerate();
        stale
    }

    /// Empties the session and switches it to a fresh identifier, so that
    /// no principal data survives and the old identifier cannot be
    /// replayed. Returns the old record for the caller to purge from the
    /// session store, as with [`renew`](Self::renew).
    #[must_use]
    pub fn invalidate(&mut self) -> Session {
        for guard in Guard::ALL {
            self.0.remove(guard.user_id_key());
        }
        self.0.remove(Self::CSRF_TOKEN_KEY);
        self.0.remove(Self::PASSWORD_CONFIRMED_AT_KEY);
        self.renew()
    }

    pub fn insert_user_id(&mut self, guard: Guard, user_id: Uuid) -> Result<(), serde_json::Error> {
        self.0.insert(guard.user_id_key(), user_id)
    }

    pub fn get_user_id(&self, guard: Guard) -> Option<Uuid> {
        self.0.get(guard.user_id_key())
    }

    /// Removes the association between this session and the principal
    /// logged in under `guard`.
    pub fn forget_user(&mut self, guard: Guard) {
        self.0.remove(guard.user_id_key());
    }

    /// The anti-forgery token bound to this session, minted on first use.
    pub fn csrf_token(&mut self) -> Result<String, serde_json::Error> {
        match self.0.get::<String>(Self::CSRF_TOKEN_KEY) {
            Some(token) => Ok(token),
            None => self.regenerate_csrf_token(),
        }
    }

    /// Issues a fresh anti-forgery token; any previously issued token can
    /// no longer be used against this session.
    pub fn regenerate_csrf_token(&mut self) -> Result<String, serde_json::Error> {
        let token = Uuid::new_v4().simple().to_string();
        self.0.insert(Self::CSRF_TOKEN_KEY, &token)?;
        Ok(token)
    }

    pub fn record_password_confirmation(&mut self) -> Result<(), serde_json::Error> {
        self.0.insert(
            Self::PASSWORD_CONFIRMED_AT_KEY,
            chrono::Utc::now().timestamp(),
        )
    }

    pub fn password_confirmed_at(&self) -> Option<i64> {
        self.0.get(Self::PASSWORD_CONFIRMED_AT_KEY)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for TypedSession
where
    S: Send + Sync,
{
    type Rejection = <WritableSession as FromRequestParts<S>>::Rejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(
            WritableSession::from_request_parts(parts, state).await?,
        ))
    }
}

impl Deref for TypedSession {
    type Target = WritableSession;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for TypedSession {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
