use consts::{firebase, FIREBASE_AUTH_BASE, FIREBASE_TOKEN_BASE};
use reqwest::{RequestBuilder, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::describe_error_code;
use crate::{AuthError, AuthSession};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileUpdateRequest<'a> {
    id_token: &'a str,
    display_name: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionResponse {
    local_id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    display_name: Option<String>,
    id_token: String,
    refresh_token: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileUpdateResponse {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    id_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    grant_type: &'static str,
    refresh_token: &'a str,
}

/// Tokens minted from a refresh token
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RefreshedTokens {
    pub user_id: String,
    pub id_token: String,
    pub refresh_token: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl From<SessionResponse> for AuthSession {
    fn from(res: SessionResponse) -> Self {
        Self {
            uid: res.local_id,
            email: res.email,
            display_name: res.display_name.filter(|n| !n.is_empty()),
            id_token: res.id_token,
            refresh_token: res.refresh_token,
        }
    }
}

/// Extracts a displayable message from an identity service error body
pub(crate) fn api_error(body: &str) -> AuthError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(env) => AuthError::Api(describe_error_code(&env.error.message)),
        Err(e) => AuthError::Decode(e.to_string()),
    }
}

/// Email/password accounts on Firebase Authentication, over its REST API
#[derive(Clone)]
pub struct FirebaseAuth {
    client: reqwest::Client,
    base: Url,
    token_base: Url,
    api_key: String,
}

impl Default for FirebaseAuth {
    fn default() -> Self {
        Self::new(
            FIREBASE_AUTH_BASE.clone(),
            FIREBASE_TOKEN_BASE.clone(),
            firebase::API_KEY,
        )
    }
}

impl FirebaseAuth {
    pub fn new(base: Url, token_base: Url, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base,
            token_base,
            api_key: api_key.into(),
        }
    }

    fn with_key(&self, base: &Url, path: &str) -> Result<Url, AuthError> {
        let mut url = base
            .join(path)
            .map_err(|e| AuthError::Decode(e.to_string()))?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    fn endpoint(&self, method: &str) -> Result<Url, AuthError> {
        self.with_key(&self.base, &format!("./accounts:{method}"))
    }

    async fn call<B: Serialize, R: DeserializeOwned>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<R, AuthError> {
        self.post(self.endpoint(method)?, body).await
    }

    async fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<R, AuthError> {
        self.send(self.client.post(url).json(body)).await
    }

    async fn send<R: DeserializeOwned>(&self, req: RequestBuilder) -> Result<R, AuthError> {
        let res = req.send().await?;

        if !res.status().is_success() {
            let body = res.text().await?;
            return Err(api_error(&body));
        }

        Ok(res.json().await?)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let res: SessionResponse = self
            .call(
                "signInWithPassword",
                &PasswordRequest {
                    email,
                    password,
                    return_secure_token: true,
                },
            )
            .await?;
        log::debug!("signed in as {}", res.local_id);
        Ok(res.into())
    }

    /// Creates the account, then attaches the display name to it
    pub async fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let created: SessionResponse = self
            .call(
                "signUp",
                &PasswordRequest {
                    email,
                    password,
                    return_secure_token: true,
                },
            )
            .await?;
        let mut session = AuthSession::from(created);

        let updated: ProfileUpdateResponse = self
            .call(
                "update",
                &ProfileUpdateRequest {
                    id_token: &session.id_token,
                    display_name: name,
                    return_secure_token: true,
                },
            )
            .await?;

        session.display_name = updated.display_name.or_else(|| Some(name.to_string()));
        if let Some(id_token) = updated.id_token {
            session.id_token = id_token;
        }
        if let Some(refresh_token) = updated.refresh_token {
            session.refresh_token = refresh_token;
        }
        log::debug!("created account {}", session.uid);

        Ok(session)
    }

    /// The token endpoint only accepts a form encoded body
    fn refresh_request(&self, refresh_token: &str) -> Result<RequestBuilder, AuthError> {
        let url = self.with_key(&self.token_base, "token")?;
        Ok(self.client.post(url).form(&RefreshRequest {
            grant_type: "refresh_token",
            refresh_token,
        }))
    }

    /// Trades a refresh token for a new id token
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshedTokens, AuthError> {
        self.send(self.refresh_request(refresh_token)?).await
    }
}
