use anyhow::{anyhow, bail, Result};
use log::{error, info};
use rocket::response::Redirect;
use rocket::{get, State};
use serde::Deserialize;
use url::Url;

use crate::auth;
use crate::config::{
    FRONTEND_ORIGIN, GOOGLE_CLIENT_ID, GOOGLE_CLIENT_SECRET, GOOGLE_REDIRECT_URL,
};
use crate::db;
use crate::models::ApiError;
use crate::AppState;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

#[derive(Debug, Deserialize)]
struct GoogleTokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    id: String,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

#[get("/google")]
pub fn google_login() -> Result<Redirect, ApiError> {
    if GOOGLE_CLIENT_ID.is_empty() || GOOGLE_CLIENT_SECRET.is_empty() {
        return Err(ApiError::internal("Google login is not configured"));
    }

    let mut consent = Url::parse(GOOGLE_AUTH_URL)
        .map_err(|_| ApiError::internal("Google login is not configured"))?;
    consent
        .query_pairs_mut()
        .append_pair("client_id", GOOGLE_CLIENT_ID.as_str())
        .append_pair("redirect_uri", GOOGLE_REDIRECT_URL.as_str())
        .append_pair("response_type", "code")
        .append_pair("scope", "profile email");

    Ok(Redirect::to(consent.to_string()))
}

#[get("/google/callback?<code>&<error>")]
pub async fn google_callback(
    code: Option<String>,
    error: Option<String>,
    state: &State<AppState>,
) -> Redirect {
    match complete_login(code, error, state).await {
        Ok(token) => Redirect::to(format!("{}/main?token={token}", &*FRONTEND_ORIGIN)),
        Err(e) => {
            error!("Google callback failed: {e}");
            Redirect::to(format!("{}/main?error=auth_failed", &*FRONTEND_ORIGIN))
        }
    }
}

async fn complete_login(
    code: Option<String>,
    error: Option<String>,
    state: &State<AppState>,
) -> Result<String> {
    if let Some(error) = error {
        bail!("identity provider returned error: {error}");
    }
    let code = code.ok_or_else(|| anyhow!("missing authorization code"))?;

    let token: GoogleTokenResponse = state
        .http
        .post(GOOGLE_TOKEN_URL)
        .form(&[
            ("code", code.as_str()),
            ("client_id", GOOGLE_CLIENT_ID.as_str()),
            ("client_secret", GOOGLE_CLIENT_SECRET.as_str()),
            ("redirect_uri", GOOGLE_REDIRECT_URL.as_str()),
            ("grant_type", "authorization_code"),
        ])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let profile: GoogleUserInfo = state
        .http
        .get(GOOGLE_USERINFO_URL)
        .bearer_auth(&token.access_token)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let email = profile
        .email
        .ok_or_else(|| anyhow!("Google profile has no email"))?;
    let username = profile.name.unwrap_or_else(|| email.clone());

    // First sight of this external identity creates the user record.
    let user = match db::find_by_google_id(&state.db, &profile.id).await? {
        Some(user) => user,
        None => {
            db::insert_google_user(
                &state.db,
                &profile.id,
                &username,
                &email,
                profile.picture.as_deref(),
            )
            .await?
        }
    };

    info!("Google login for {}", user.email);
    Ok(auth::issue_token(&user)?)
}
