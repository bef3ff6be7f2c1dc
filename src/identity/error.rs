use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    #[error("Authentication credentials were not provided")]
    MissingCredentials,
    #[error("Authentication error. The token cannot be decoded")]
    InvalidToken,
    #[error("The user corresponding to this token has not been found")]
    UnknownUser,
    #[error("This user has been deactivated")]
    Inactive,
    #[error("A user with this email and password was not found")]
    InvalidCredentials,
    #[error("Token could not be issued: {0}")]
    TokenIssue(String),
    #[error("Identity lookup failed: {0}")]
    Lookup(String),
}
