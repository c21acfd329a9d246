//! Calls against the account gateway.

use gloo_net::http::Request;
use serde::{Deserialize, Serialize};

use crate::env_variable_utils::BACKEND_URL;
use crate::models::UserProfile;

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    msg: String,
}

/// Pull the server's `msg` out of an error body, falling back to the raw
/// text when the body is not the expected shape.
async fn extract_error(response: gloo_net::http::Response) -> String {
    let status = response.status();
    match response.text().await {
        Ok(body) => match serde_json::from_str::<MessageResponse>(&body) {
            Ok(message) => message.msg,
            Err(_) => format!("Request failed ({status}): {body}"),
        },
        Err(_) => format!("Request failed with status: {status}"),
    }
}

pub async fn register(username: &str, email: &str, password: &str) -> Result<String, String> {
    let url = format!("{}/register", &*BACKEND_URL);
    let body = RegisterRequest {
        username,
        email,
        password,
    };
    let response = Request::post(&url)
        .json(&body)
        .map_err(|e| format!("Failed to encode request: {e}"))?
        .send()
        .await
        .map_err(|e| format!("Failed to connect to backend: {e}"))?;

    if response.ok() {
        match response.json::<MessageResponse>().await {
            Ok(message) => Ok(message.msg),
            Err(e) => Err(format!("Failed to parse response: {e}")),
        }
    } else {
        Err(extract_error(response).await)
    }
}

pub async fn login(email: &str, password: &str) -> Result<String, String> {
    let url = format!("{}/login", &*BACKEND_URL);
    let body = LoginRequest { email, password };
    let response = Request::post(&url)
        .json(&body)
        .map_err(|e| format!("Failed to encode request: {e}"))?
        .send()
        .await
        .map_err(|e| format!("Failed to connect to backend: {e}"))?;

    if response.ok() {
        match response.json::<TokenResponse>().await {
            Ok(token) => Ok(token.token),
            Err(e) => Err(format!("Failed to parse response: {e}")),
        }
    } else {
        Err(extract_error(response).await)
    }
}

pub async fn verify_token(token: &str) -> Result<UserProfile, String> {
    let url = format!("{}/verify-token", &*BACKEND_URL);
    let response = Request::get(&url)
        .header("Authorization", &format!("Bearer {token}"))
        .send()
        .await
        .map_err(|e| format!("Failed to connect to backend: {e}"))?;

    if response.ok() {
        response
            .json::<UserProfile>()
            .await
            .map_err(|e| format!("Failed to parse response: {e}"))
    } else {
        Err(extract_error(response).await)
    }
}

/// Where the Google sign-in flow starts; the browser navigates there
/// directly.
pub fn google_login_url() -> String {
    format!("{}/auth/google", &*BACKEND_URL)
}
