use crate::AppState;
use anyhow::Result;
use env_logger::Builder;
use lazy_static::lazy_static;
use log::{info, warn, LevelFilter};
use rocket::http::Method;
use rocket_cors::{AllowedHeaders, AllowedOrigins, CorsOptions};
use std::env;

lazy_static! {
    pub static ref JWT_SECRET: String = env::var("JWT_SECRET").unwrap_or_default();
    pub static ref DATABASE_URL: String =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://studyhub.db?mode=rwc".to_string());
    pub static ref FRONTEND_ORIGIN: String =
        env::var("FRONTEND_ORIGIN").unwrap_or_else(|_| "http://localhost:8080".to_string());
    pub static ref GOOGLE_CLIENT_ID: String = env::var("GOOGLE_CLIENT_ID").unwrap_or_default();
    pub static ref GOOGLE_CLIENT_SECRET: String =
        env::var("GOOGLE_CLIENT_SECRET").unwrap_or_default();
    pub static ref GOOGLE_REDIRECT_URL: String = env::var("GOOGLE_REDIRECT_URL")
        .unwrap_or_else(|_| "http://localhost:8000/auth/google/callback".to_string());
}

pub fn init_logger() {
    Builder::new().filter_level(LevelFilter::Info).init();
    info!("Starting StudyHub auth gateway...");
}

pub fn load_environment() {
    dotenv::dotenv().ok();
}

pub async fn create_app_state() -> Result<AppState> {
    // A missing secret or OAuth pair only degrades the matching feature.
    if JWT_SECRET.is_empty() {
        warn!("JWT_SECRET is not set; login and token verification will fail");
    }
    if GOOGLE_CLIENT_ID.is_empty() || GOOGLE_CLIENT_SECRET.is_empty() {
        warn!("Google OAuth credentials are not set; /auth/google is disabled");
    }

    let db = crate::db::init_pool(&DATABASE_URL).await?;
    info!("Connected to credential store at {}", &*DATABASE_URL);

    Ok(AppState {
        db,
        http: reqwest::Client::new(),
    })
}

pub fn create_cors() -> Result<rocket_cors::Cors> {
    let cors = CorsOptions::default()
        .allowed_origins(AllowedOrigins::some_exact(&[FRONTEND_ORIGIN.as_str()]))
        .allowed_methods(
            vec![Method::Get, Method::Post, Method::Options]
                .into_iter()
                .map(From::from)
                .collect(),
        )
        .allowed_headers(AllowedHeaders::some(&[
            "Authorization",
            "Accept",
            "Content-Type",
        ]))
        .allow_credentials(true)
        .to_cors()
        .map_err(|e| anyhow::anyhow!("Failed to create CORS options: {}", e))?;

    Ok(cors)
}
