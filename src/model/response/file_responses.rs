use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

use crate::model::repository::{AccessLevel, FileEntry, StorageType};
use crate::model::response::BasicMessage;

type NoContent = ();

/// one entry in a reconstructed tree. Folders carry their (possibly nested)
/// visible children; files always have an empty `children` array
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct FileTreeNode {
    #[serde(rename = "fileID")]
    pub file_id: String,
    pub name: String,
    #[serde(rename = "storageType")]
    pub storage_type: StorageType,
    pub parent: String,
    pub access: AccessLevel,
    pub size: u64,
    #[serde(rename = "isURL")]
    pub is_url: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "mimeType", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub version: u32,
    #[serde(rename = "downloadCount")]
    pub download_count: u64,
    #[serde(rename = "createdBy")]
    pub created_by: String,
    pub children: Vec<FileTreeNode>,
}

impl From<&FileEntry> for FileTreeNode {
    fn from(entry: &FileEntry) -> Self {
        FileTreeNode {
            file_id: entry.file_id.clone(),
            name: entry.name.clone(),
            storage_type: entry.storage_type,
            parent: entry.parent.clone(),
            access: entry.access,
            size: entry.size,
            is_url: entry.is_url,
            url: entry.url.clone(),
            mime_type: entry.mime_type.clone(),
            description: entry.description.clone(),
            version: entry.version,
            download_count: entry.download_count,
            created_by: entry.created_by.clone(),
            children: Vec::new(),
        }
    }
}

/// one step of the breadcrumb path from the project root down to a target
/// entry. The root is represented by empty strings
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct PathNode {
    #[serde(rename = "fileID")]
    pub file_id: String,
    pub name: String,
}

impl PathNode {
    pub fn root() -> PathNode {
        PathNode {
            file_id: String::new(),
            name: String::new(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct FolderContentsResponse {
    pub files: Vec<FileTreeNode>,
    pub path: Vec<PathNode>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct EntryResponse {
    pub file: FileTreeNode,
    pub path: Vec<PathNode>,
}

#[derive(Responder)]
pub enum ListFolderResponse {
    #[response(status = 200)]
    Success(Json<FolderContentsResponse>),
    #[response(status = 404, content_type = "json")]
    ProjectNotFound(Json<BasicMessage>),
    #[response(status = 404, content_type = "json")]
    FolderNotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    DbError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
}

#[derive(Responder)]
pub enum GetEntryResponse {
    #[response(status = 200)]
    Success(Json<EntryResponse>),
    #[response(status = 404, content_type = "json")]
    ProjectNotFound(Json<BasicMessage>),
    #[response(status = 404, content_type = "json")]
    EntryNotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    DbError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
}

#[derive(Responder)]
pub enum DownloadEntryResponse {
    #[response(status = 200)]
    Success(Vec<u8>),
    #[response(status = 404, content_type = "json")]
    ProjectNotFound(Json<BasicMessage>),
    #[response(status = 404, content_type = "json")]
    EntryNotFound(Json<BasicMessage>),
    #[response(status = 400, content_type = "json")]
    NotDownloadable(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    DbError(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    StorageError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
}

#[derive(Responder)]
pub enum AddEntryResponse {
    #[response(status = 201)]
    Created(Json<FileTreeNode>),
    #[response(status = 404, content_type = "json")]
    ProjectNotFound(Json<BasicMessage>),
    #[response(status = 404, content_type = "json")]
    ParentNotFound(Json<BasicMessage>),
    #[response(status = 400, content_type = "json")]
    BadRequest(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    DbError(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    StorageError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
    #[response(status = 403, content_type = "json")]
    Forbidden(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum RenameEntryResponse {
    #[response(status = 204)]
    Success(NoContent),
    #[response(status = 404, content_type = "json")]
    ProjectNotFound(Json<BasicMessage>),
    #[response(status = 404, content_type = "json")]
    EntryNotFound(Json<BasicMessage>),
    #[response(status = 400, content_type = "json")]
    BadRequest(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    DbError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
    #[response(status = 403, content_type = "json")]
    Forbidden(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum MoveEntryResponse {
    #[response(status = 204)]
    Success(NoContent),
    #[response(status = 404, content_type = "json")]
    ProjectNotFound(Json<BasicMessage>),
    #[response(status = 404, content_type = "json")]
    EntryNotFound(Json<BasicMessage>),
    #[response(status = 404, content_type = "json")]
    ParentNotFound(Json<BasicMessage>),
    #[response(status = 400, content_type = "json")]
    NotAllowed(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    DbError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
    #[response(status = 403, content_type = "json")]
    Forbidden(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum SetAccessResponse {
    #[response(status = 204)]
    Success(NoContent),
    #[response(status = 404, content_type = "json")]
    ProjectNotFound(Json<BasicMessage>),
    #[response(status = 404, content_type = "json")]
    EntryNotFound(Json<BasicMessage>),
    #[response(status = 400, content_type = "json")]
    InvalidLevel(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    DbError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
    #[response(status = 403, content_type = "json")]
    Forbidden(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum DeleteEntryResponse {
    #[response(status = 204)]
    Success(NoContent),
    #[response(status = 404, content_type = "json")]
    ProjectNotFound(Json<BasicMessage>),
    #[response(status = 404, content_type = "json")]
    EntryNotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    DbError(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    StorageError(Json<BasicMessage>),
    #[response(status = 401)]
    Unauthorized(String),
    #[response(status = 403, content_type = "json")]
    Forbidden(Json<BasicMessage>),
}
