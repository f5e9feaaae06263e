use rocket::serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    /// platform role, one of `admin`, `instructor`, or `user`; defaults to `user`
    pub role: Option<String>,
}
