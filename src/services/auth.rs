// src/services/auth.rs

//! Portal login service.
//!
//! Posts the form-encoded login request and extracts session cookies from
//! the response. The portal answers a successful login with a 302 whose
//! Set-Cookie headers carry the session, so redirects are never followed.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::{Client, StatusCode, header::HeaderMap};

use crate::error::{AppError, Result};
use crate::models::Config;
use crate::utils::http;
use crate::utils::retry::{RetryPolicy, retry};

/// Login attempt budget.
pub const LOGIN_ATTEMPTS: u32 = 20;

/// Fixed delay between login attempts.
pub const LOGIN_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Service that logs in and produces the session cookie set.
pub struct Authenticator {
    client: Client,
    headers: HeaderMap,
    url: String,
    username: String,
    password: String,
    policy: RetryPolicy,
}

impl Authenticator {
    /// Create a new authenticator from the application configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: http::create_login_client(&config.portal)?,
            headers: http::portal_headers(&config.portal)?,
            url: config.apis.login.clone(),
            username: config.user.username.clone(),
            password: config.user.password.clone(),
            policy: RetryPolicy::new(LOGIN_ATTEMPTS, LOGIN_RETRY_DELAY),
        })
    }

    /// Log in, retrying transient failures up to the attempt budget.
    ///
    /// Returns the session cookies on success; exhausting the budget is a
    /// terminal authentication error.
    pub async fn login(&self) -> Result<HashMap<String, String>> {
        match retry(&self.policy, |attempt| self.try_login(attempt)).await {
            Ok(cookies) => {
                log::info!("User {} logged in ({} cookies)", self.username, cookies.len());
                Ok(cookies)
            }
            Err(error) => Err(AppError::Auth {
                attempts: self.policy.attempts,
                message: error.to_string(),
            }),
        }
    }

    /// One login attempt.
    async fn try_login(&self, attempt: u32) -> Result<HashMap<String, String>> {
        log::debug!("Login attempt {attempt}/{}", self.policy.attempts);

        let response = self
            .client
            .post(&self.url)
            .headers(self.headers.clone())
            .form(&login_form(&self.username, &self.password))
            .send()
            .await?;

        let status = response.status();
        if !is_login_success(status) {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::LoginRejected {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        Ok(response
            .cookies()
            .map(|cookie| (cookie.name().to_string(), cookie.value().to_string()))
            .collect())
    }
}

/// Form fields the login endpoint expects. `yzm=1` bypasses the captcha,
/// `logintype=sno` selects student-number login.
fn login_form<'a>(username: &'a str, password: &'a str) -> [(&'static str, &'a str); 6] {
    [
        ("dlm", username),
        ("mm", password),
        ("yzm", "1"),
        ("logintype", "sno"),
        ("continueurl", ""),
        ("openid", ""),
    ]
}

/// A login is accepted on a plain 200 or the usual 302 redirect.
fn is_login_success(status: StatusCode) -> bool {
    status == StatusCode::OK || status == StatusCode::FOUND
}
