pub mod error;
pub mod firebase;
pub mod helper;

pub use error::AuthError;
pub use firebase::{FirebaseAuth, RefreshedTokens};
pub use helper::{
    use_auth_helper, AuthHelper, AuthProcess, ErrorMap, ErrorSetter, ErrorTag, FormValidator,
};

use serde::{Deserialize, Serialize};

/// A signed in user, as returned by the identity service
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    pub id_token: String,
    pub refresh_token: String,
}

impl AuthSession {
    /// Swaps in freshly minted tokens, keeping the profile fields
    pub fn with_tokens(self, tokens: RefreshedTokens) -> Self {
        Self {
            id_token: tokens.id_token,
            refresh_token: tokens.refresh_token,
            ..self
        }
    }
}
