use rocket::serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct CreateFolderRequest {
    pub name: String,
    /// `file_id` of the containing folder; absent or empty for the project root
    pub parent: Option<String>,
}

#[derive(Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct AddUrlRequest {
    pub name: String,
    pub url: String,
    pub parent: Option<String>,
    /// one of the explicit access levels; defaults to `team`
    pub access: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct RenameEntryRequest {
    pub name: String,
}

#[derive(Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct MoveEntryRequest {
    /// `file_id` of the destination folder, or empty string for the project root
    #[serde(rename = "newParent")]
    pub new_parent: String,
}

#[derive(Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct SetAccessRequest {
    pub access: String,
}
