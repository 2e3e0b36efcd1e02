//! HTTP client for the catalog backend
//!
//! Thin wrapper around reqwest that owns the base URL and the session
//! token. Catalog endpoints answer with a `{success, data, message}`
//! envelope; the YouTube panel endpoints return their payload directly.

use crate::auth::models::{LoginRequest, LoginResponse, User, ValidateResponse};
use crate::error::{Error, Result};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::types::{ApiEnvelope, ErrorBody};

/// Wrapper around the reqwest client
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
    token: Option<String>,
}

/// Verdict of a token validation request
#[derive(Debug)]
pub enum ValidateOutcome {
    /// The backend vouched for the token
    Valid(User),
    /// The backend explicitly refused the token
    Rejected,
    /// No verdict: transport failure, unexpected status or unreadable body
    Unavailable(Error),
}

/// Verdict of a login request
#[derive(Debug)]
pub enum LoginOutcome {
    /// Credentials accepted, token issued
    Success { token: String, user: User },
    /// The backend refused the credentials
    Rejected(String),
    /// The request never produced a usable answer
    Unavailable(Error),
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
            token: None,
        }
    }

    /// Attach or replace the session token sent with authenticated requests
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer(&self) -> Result<&str> {
        self.token.as_deref().ok_or(Error::NotAuthenticated)
    }

    /// Ask the backend whether a token still identifies a user
    pub async fn validate_token(&self, token: &str) -> ValidateOutcome {
        let response = match self
            .client
            .get(self.url("/auth/validate"))
            .bearer_auth(token)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return ValidateOutcome::Unavailable(e.into()),
        };

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return ValidateOutcome::Rejected;
        }
        if !status.is_success() {
            return ValidateOutcome::Unavailable(Error::Api(format!(
                "validation endpoint answered {}",
                status
            )));
        }

        match response.json::<ValidateResponse>().await {
            Ok(body) => ValidateOutcome::Valid(body.user),
            Err(e) => ValidateOutcome::Unavailable(e.into()),
        }
    }

    /// Exchange credentials for a token
    pub async fn login(&self, email: &str, password: &str) -> LoginOutcome {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = match self
            .client
            .post(self.url("/auth/login"))
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return LoginOutcome::Unavailable(e.into()),
        };

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| format!("login endpoint answered {}", status));
            return LoginOutcome::Rejected(message);
        }

        match response.json::<LoginResponse>().await {
            Ok(body) => LoginOutcome::Success {
                token: body.access_token,
                user: body.user,
            },
            Err(e) => LoginOutcome::Unavailable(e.into()),
        }
    }

    /// GET an envelope endpoint and unwrap its payload
    pub async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(self.bearer()?)
            .send()
            .await?;
        let envelope: ApiEnvelope<T> = check_status(response).await?.json().await?;
        envelope.into_data()
    }

    /// POST to an envelope endpoint, requiring only an acknowledgement
    pub async fn post_ack<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(self.bearer()?)
            .json(body)
            .send()
            .await?;
        let envelope: ApiEnvelope<serde_json::Value> = check_status(response).await?.json().await?;
        envelope.into_ack()
    }

    /// GET an endpoint that returns its payload directly
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(self.bearer()?)
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }

    /// POST to an endpoint that returns its payload directly
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(self.bearer()?)
            .json(body)
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }
}

/// Map a non-success status to an error, surfacing the backend's message
/// when it sent one
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(Error::NotAuthenticated);
    }

    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|b| b.message);
    Err(Error::Api(message.unwrap_or_else(|| {
        format!("request failed with status {}", status)
    })))
}
