use log::{info, warn};
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::serde::json::Json;
use rocket::{get, post, Request, State};

use crate::auth;
use crate::db;
use crate::models::{
    ApiError, LoginRequest, MessageResponse, RegisterRequest, TokenResponse, UserProfile,
};
use crate::AppState;

pub struct BearerToken(pub String);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for BearerToken {
    type Error = &'static str;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let token = request
            .headers()
            .get_one("Authorization")
            .and_then(|header| header.strip_prefix("Bearer "));

        match token {
            Some(token) => Outcome::Success(BearerToken(token.to_string())),
            None => Outcome::Error((Status::Unauthorized, "No token")),
        }
    }
}

#[post("/register", data = "<request>")]
pub async fn register(
    request: Json<RegisterRequest>,
    state: &State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    let request = request.into_inner();
    if request.username.trim().is_empty()
        || request.email.trim().is_empty()
        || request.password.is_empty()
    {
        return Err(ApiError::bad_request("All fields required"));
    }

    info!("Register attempt: {}", request.email);

    let existing = db::find_by_email(&state.db, &request.email)
        .await
        .map_err(|e| {
            warn!("Credential store lookup failed: {e}");
            ApiError::internal("Registration failed")
        })?;
    if existing.is_some() {
        return Err(ApiError::bad_request("Email already registered"));
    }

    let password_hash = auth::hash_password(&request.password)
        .map_err(|_| ApiError::internal("Registration failed"))?;
    db::insert_local_user(&state.db, &request.username, &request.email, &password_hash)
        .await
        .map_err(|e| {
            warn!("Failed to insert user: {e}");
            ApiError::internal("Registration failed")
        })?;

    info!("Registration successful for: {}", request.email);
    Ok(Json(MessageResponse {
        msg: "Registration successful! Please login.".to_string(),
    }))
}

#[post("/login", data = "<request>")]
pub async fn login(
    request: Json<LoginRequest>,
    state: &State<AppState>,
) -> Result<Json<TokenResponse>, ApiError> {
    let request = request.into_inner();
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(ApiError::bad_request("All fields required"));
    }

    info!("Login attempt: {}", request.email);

    let user = db::find_by_email(&state.db, &request.email)
        .await
        .map_err(|e| {
            warn!("Credential store lookup failed: {e}");
            ApiError::internal("Login failed")
        })?;

    // Unknown email, an external-identity-only account, and a password
    // mismatch must be indistinguishable to the client.
    let user = match user {
        Some(user) => user,
        None => return Err(ApiError::bad_request("Invalid credentials")),
    };
    let stored_hash = match user.password_hash.as_deref() {
        Some(hash) => hash,
        None => return Err(ApiError::bad_request("Invalid credentials")),
    };
    if !auth::verify_password(&request.password, stored_hash) {
        return Err(ApiError::bad_request("Invalid credentials"));
    }

    let token = auth::issue_token(&user).map_err(|e| {
        warn!("Token issuance failed: {e}");
        ApiError::internal("Login failed")
    })?;
    Ok(Json(TokenResponse { token }))
}

#[get("/verify-token")]
pub async fn verify_token(
    token: BearerToken,
    state: &State<AppState>,
) -> Result<Json<UserProfile>, ApiError> {
    let claims =
        auth::verify_token(&token.0).map_err(|_| ApiError::unauthorized("Invalid token"))?;

    let user = db::find_by_id(&state.db, claims.sub).await.map_err(|e| {
        warn!("Credential store lookup failed: {e}");
        ApiError::internal("Verification failed")
    })?;

    match user {
        Some(user) => Ok(Json(UserProfile::from(&user))),
        None => Err(ApiError::unauthorized("Invalid token")),
    }
}

#[cfg(test)]
mod tests {
    use rocket::http::{ContentType, Header, Status};
    use rocket::local::asynchronous::Client;
    use rocket::routes;
    use serde_json::{json, Value};

    use crate::models::User;
    use crate::{auth, db, AppState};

    async fn test_client() -> Client {
        std::env::set_var("JWT_SECRET", "test-secret");
        let state = AppState {
            db: db::init_pool("sqlite::memory:").await.unwrap(),
            http: reqwest::Client::new(),
        };
        let rocket = rocket::build().manage(state).mount(
            "/",
            routes![super::register, super::login, super::verify_token],
        );
        Client::tracked(rocket).await.unwrap()
    }

    async fn register_alice(client: &Client) {
        let response = client
            .post("/register")
            .header(ContentType::JSON)
            .body(
                json!({"username": "alice", "email": "alice@example.com", "password": "hunter2"})
                    .to_string(),
            )
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);
    }

    async fn error_msg(response: rocket::local::asynchronous::LocalResponse<'_>) -> String {
        let body: Value =
            serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        body["msg"].as_str().unwrap().to_string()
    }

    #[rocket::async_test]
    async fn register_rejects_missing_fields() {
        let client = test_client().await;
        let response = client
            .post("/register")
            .header(ContentType::JSON)
            .body(json!({"username": "", "email": "a@b.c", "password": "x"}).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::BadRequest);
        assert_eq!(error_msg(response).await, "All fields required");
    }

    #[rocket::async_test]
    async fn register_rejects_duplicate_email() {
        let client = test_client().await;
        register_alice(&client).await;

        let response = client
            .post("/register")
            .header(ContentType::JSON)
            .body(
                json!({"username": "other", "email": "alice@example.com", "password": "pw"})
                    .to_string(),
            )
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::BadRequest);
        assert_eq!(error_msg(response).await, "Email already registered");
    }

    #[rocket::async_test]
    async fn login_and_verify_round_trip() {
        let client = test_client().await;
        register_alice(&client).await;

        let response = client
            .post("/login")
            .header(ContentType::JSON)
            .body(json!({"email": "alice@example.com", "password": "hunter2"}).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);
        let body: Value =
            serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        let token = body["token"].as_str().unwrap().to_string();

        let response = client
            .get("/verify-token")
            .header(Header::new("Authorization", format!("Bearer {token}")))
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);
        let profile: Value =
            serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        assert_eq!(profile["username"], "alice");
        assert_eq!(profile["email"], "alice@example.com");
        assert!(profile.get("password_hash").is_none());
    }

    #[rocket::async_test]
    async fn invalid_credentials_are_uniform() {
        let client = test_client().await;
        register_alice(&client).await;

        // Google-only account: no password hash on record.
        let state = client.rocket().state::<AppState>().unwrap();
        db::insert_google_user(&state.db, "g-1", "Bob", "bob@gmail.com", None)
            .await
            .unwrap();

        let attempts = [
            json!({"email": "nobody@example.com", "password": "x"}),
            json!({"email": "alice@example.com", "password": "wrong"}),
            json!({"email": "bob@gmail.com", "password": "anything"}),
        ];
        for payload in attempts {
            let response = client
                .post("/login")
                .header(ContentType::JSON)
                .body(payload.to_string())
                .dispatch()
                .await;
            assert_eq!(response.status(), Status::BadRequest);
            assert_eq!(error_msg(response).await, "Invalid credentials");
        }
    }

    #[rocket::async_test]
    async fn tampered_token_is_unauthorized() {
        let client = test_client().await;

        let state = client.rocket().state::<AppState>().unwrap();
        let hash = auth::hash_password("pw").unwrap();
        let user: User = db::insert_local_user(&state.db, "alice", "alice@example.com", &hash)
            .await
            .unwrap();
        let mut token = auth::issue_token(&user).unwrap();
        token.push('x');

        let response = client
            .get("/verify-token")
            .header(Header::new("Authorization", format!("Bearer {token}")))
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Unauthorized);
        assert_eq!(error_msg(response).await, "Invalid token");
    }
}
