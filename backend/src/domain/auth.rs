//! Credential primitives shared by signup and signin.
//!
//! Form payloads are parsed into [`Credentials`] before a handler talks to a
//! driving port, so services only ever see trimmed, non-blank input.

use std::fmt;

use zeroize::Zeroizing;

/// Domain error returned when a credential form is incomplete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Username and plaintext password submitted by a browser.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and keeps caller-provided whitespace. It is
///   zeroed on drop.
///
/// # Examples
/// ```
/// use shayari::domain::Credentials;
///
/// let creds = Credentials::try_from_parts(" alice ", "pw1").unwrap();
/// assert_eq!(creds.username(), "alice");
/// assert_eq!(creds.password(), "pw1");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw form inputs.
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(CredentialsValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Trimmed username.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Plaintext password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
