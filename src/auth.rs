use anyhow::Context;
use chrono::{DateTime, Local};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Process-local session. Created on successful authentication, discarded
/// on logout or process exit; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub email: String,
    pub started_at: DateTime<Local>,
}

impl Session {
    pub fn for_email(email: &str) -> Self {
        Self {
            email: email.to_string(),
            started_at: Local::now(),
        }
    }
}

/// Failure taxonomy surfaced to the login dialog. Each variant maps to a
/// dialog title and message; the form stays editable and nothing is
/// retried or rate-limited.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    PasswordTooShort,
    EmailNotRegistered,
    InvalidPassword,
    Provider(String),
}

impl AuthError {
    pub fn dialog_title(&self) -> &'static str {
        match self {
            AuthError::PasswordTooShort => "Password Error",
            AuthError::EmailNotRegistered => "Email Not Registered",
            AuthError::InvalidPassword => "Invalid Password",
            AuthError::Provider(_) => "Authentication Failed",
        }
    }

    pub fn dialog_message(&self) -> String {
        match self {
            AuthError::PasswordTooShort => {
                format!("Password must be at least {MIN_PASSWORD_LEN} characters long.")
            }
            AuthError::EmailNotRegistered => "This email is not registered.".to_string(),
            AuthError::InvalidPassword => "Invalid password. Please try again.".to_string(),
            AuthError::Provider(detail) => format!("Authentication failed: {detail}"),
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dialog_message())
    }
}

impl std::error::Error for AuthError {}

/// Single authentication capability. The credential check and the sign-in
/// step are one atomic call against the hosted provider; this process never
/// compares secrets itself beyond the length precheck.
pub trait AuthProvider {
    fn authenticate(&self, credentials: &Credentials) -> Result<Session, AuthError>;
}

/// Local validation run before any provider round trip.
pub fn validate_credentials(credentials: &Credentials) -> Result<(), AuthError> {
    if credentials.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::PasswordTooShort);
    }
    Ok(())
}

pub struct HostedAuthProvider {
    client: Client,
    login_url: String,
}

impl HostedAuthProvider {
    pub fn new(auth_url: &str) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .user_agent("canvas-ai")
            .build()
            .context("build auth http client")?;
        Ok(Self {
            client,
            login_url: format!("{}/login", auth_url.trim_end_matches('/')),
        })
    }
}

#[derive(Deserialize, Default)]
struct ProviderErrorBody {
    #[serde(default)]
    error: String,
}

impl AuthProvider for HostedAuthProvider {
    fn authenticate(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        validate_credentials(credentials)?;

        let response = self
            .client
            .post(&self.login_url)
            .json(credentials)
            .send()
            .map_err(|err| AuthError::Provider(err.to_string()))?;

        match response.status() {
            status if status.is_success() => Ok(Session::for_email(&credentials.email)),
            StatusCode::NOT_FOUND => Err(AuthError::EmailNotRegistered),
            StatusCode::UNAUTHORIZED => Err(AuthError::InvalidPassword),
            status => {
                let detail = response
                    .json::<ProviderErrorBody>()
                    .map(|body| body.error)
                    .ok()
                    .filter(|detail| !detail.is_empty())
                    .unwrap_or_else(|| status.to_string());
                warn!(%status, "auth provider rejected login");
                Err(AuthError::Provider(detail))
            }
        }
    }
}
