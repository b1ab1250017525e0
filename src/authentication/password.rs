use anyhow::Context;
use argon2::{
    password_hash::SaltString, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier,
    Version,
};
use secrecy::{ExposeSecret, Secret};
use std::cmp;
use uuid::Uuid;

use super::UserStore;
use crate::telemetry::spawn_blocking_with_tracing;

#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials.")]
    InvalidCredentials(#[source] anyhow::Error),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

pub struct Credentials {
    pub username: String,
    pub password: Secret<String>,
}

#[tracing::instrument(name = "Validate credentials", skip(credentials, users))]
pub async fn validate_credentials(
    credentials: Credentials,
    users: &UserStore,
) -> Result<Uuid, AuthError> {
    // Fall back to a dummy hash so unknown usernames still pay the full
    // verification cost.
    let mut user_id = None;
    let mut expected_password_hash = Secret::new("$argon2id$v=19$m=19456,t=2,p=1$aXQxUFVHWUtFOVBWdENDYw$PlswAoDyDIzJ5ME4Eja3NeKFOSIwlwaXAnnyEmuK46o".to_string());

    if let Some((stored_user_id, stored_password_hash)) =
        users.stored_credentials(&credentials.username).await
    {
        user_id = Some(stored_user_id);
        expected_password_hash = stored_password_hash;
    }

    spawn_blocking_with_tracing(move || {
        verify_password_hash(expected_password_hash, credentials.password)
    })
    .await
    .context("Failed to spawn blocking task.")??;

    user_id
        .ok_or_else(|| anyhow::anyhow!("Unknown username."))
        .map_err(AuthError::InvalidCredentials)
}

#[tracing::instrument(
    name = "Verify password hash",
    skip(expected_password_hash, password_candidate)
)]
fn verify_password_hash(
    expected_password_hash: Secret<String>,
    password_candidate: Secret<String>,
) -> Result<(), AuthError> {
    let expected_password_hash = PasswordHash::new(expected_password_hash.expose_secret())
        .context("Failed to parse hash in PHC string format.")?;

    Argon2::default()
        .verify_password(
            password_candidate.expose_secret().as_bytes(),
            &expected_password_hash,
        )
        .context("Invalid password.")
        .map_err(AuthError::InvalidCredentials)
}

pub(super) fn compute_password_hash(
    password: Secret<String>,
) -> Result<Secret<String>, anyhow::Error> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let password_hash = Argon2::new(
        argon2::Algorithm::Argon2id,
        Version::V0x13,
        get_argon_params(),
    )
    .hash_password(password.expose_secret().as_bytes(), &salt)?
    .to_string();
    Ok(Secret::new(password_hash))
}

fn get_argon_params() -> Params {
    let m_cost = cmp::max(19456, Params::DEFAULT_M_COST);
    let t_cost = cmp::max(2, Params::DEFAULT_T_COST);
    let p_cost = cmp::max(1, Params::DEFAULT_P_COST);

    Params::new(m_cost, t_cost, p_cost, None).unwrap()
}
