use rocket::serde::json::Json;

use crate::guard::{Auth, ValidateResult};
use crate::model::error::user_errors::CreateUserError;
use crate::model::repository::PlatformRole;
use crate::model::request::user_requests::CreateUserRequest;
use crate::model::response::api_responses::{CreateUserResponse, VersionResponse};
use crate::model::response::BasicMessage;
use crate::service::user_service;

#[get("/version")]
pub fn api_version() -> Json<VersionResponse> {
    Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[post("/users", data = "<request>")]
pub fn create_user(request: Json<CreateUserRequest>, auth: Option<Auth>) -> CreateUserResponse {
    // the very first user may self-register; after that only platform admins add accounts
    if user_service::any_user_exists() {
        match auth.map(|a| a.validate()) {
            Some(ValidateResult::Valid(user)) if user.role == PlatformRole::Admin => (),
            _ => {
                return CreateUserResponse::BadRequest(BasicMessage::new(
                    "Only platform admins can create new users.",
                ))
            }
        }
    }
    match user_service::create_user(&request.into_inner()) {
        Ok(()) => CreateUserResponse::Created(BasicMessage::new("User created.")),
        Err(CreateUserError::AlreadyExists) => CreateUserResponse::BadRequest(BasicMessage::new(
            "A user with that name already exists.",
        )),
        Err(CreateUserError::InvalidRequest) => CreateUserResponse::BadRequest(BasicMessage::new(
            "Username, password, and role must all be valid.",
        )),
        Err(CreateUserError::DbFailure) => CreateUserResponse::DbError(BasicMessage::new(
            "Failed to save the user. Check the server logs for details.",
        )),
    }
}
