use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("no account registered for {0}")]
    UnknownAccount(String),

    #[error("not signed in")]
    NotSignedIn,

    #[error("identity provider error: {0}")]
    Provider(String),

    #[error("{0}")]
    Other(String),
}
