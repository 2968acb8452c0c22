use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    /// Rejected by the identity service, carries a message fit for display
    #[error("{0}")]
    Api(String),
    #[error("Could not reach the server. Check your connection and try again.")]
    Network(String),
    #[error("Unexpected response from the server")]
    Decode(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}

/// Maps an identity service error code to a message for the login form
///
/// Codes may carry a detail suffix, e.g. `WEAK_PASSWORD : Password should be at least 6 characters`.
pub fn describe_error_code(code: &str) -> String {
    let key = code.split(':').next().unwrap_or_default().trim();
    let msg = match key {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            "The email address or password is incorrect."
        }
        "EMAIL_EXISTS" => "This email address is already registered.",
        "INVALID_EMAIL" => "The email address is invalid.",
        "WEAK_PASSWORD" => "The password is too weak.",
        "USER_DISABLED" => "This account has been disabled.",
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "Too many attempts. Please try again later.",
        _ => return code.to_string(),
    };
    msg.to_string()
}
