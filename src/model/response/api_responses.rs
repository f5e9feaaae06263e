use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

use crate::model::response::BasicMessage;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct VersionResponse {
    pub version: String,
}

#[derive(Responder)]
pub enum CreateUserResponse {
    #[response(status = 201, content_type = "json")]
    Created(Json<BasicMessage>),
    #[response(status = 400, content_type = "json")]
    BadRequest(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    DbError(Json<BasicMessage>),
}
