use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::Responder;
use rocket::serde::{Deserialize, Serialize};
use rocket::{response, Response};
use std::io::Cursor;

/// A row from the `users` table. The password hash never leaves this module
/// boundary; responses use [`UserProfile`] instead.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub profile_picture: Option<String>,
    pub password_hash: Option<String>,
    pub google_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub profile_picture: Option<String>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        UserProfile {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            profile_picture: user.profile_picture.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub msg: String,
}

/// JSON error body in the `{ "msg": ... }` shape the frontend surfaces
/// verbatim, with a configurable status code.
#[derive(Debug)]
pub struct ApiError {
    pub status: Status,
    pub body: MessageResponse,
}

impl ApiError {
    pub fn bad_request(msg: &str) -> Self {
        ApiError {
            status: Status::BadRequest,
            body: MessageResponse {
                msg: msg.to_string(),
            },
        }
    }

    pub fn unauthorized(msg: &str) -> Self {
        ApiError {
            status: Status::Unauthorized,
            body: MessageResponse {
                msg: msg.to_string(),
            },
        }
    }

    pub fn internal(msg: &str) -> Self {
        ApiError {
            status: Status::InternalServerError,
            body: MessageResponse {
                msg: msg.to_string(),
            },
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let json =
            serde_json::to_string(&self.body).map_err(|_| Status::InternalServerError)?;
        Response::build()
            .status(self.status)
            .header(ContentType::JSON)
            .sized_body(json.len(), Cursor::new(json))
            .ok()
    }
}
