use rocket::form::Form;
use rocket::serde::json::Json;

use crate::guard::{self, Auth, CapabilityError, ValidateResult};
use crate::model::error::file_errors::{
    AddEntryError, DeleteEntryError, DownloadEntryError, GetEntryError, ListFolderError,
    MoveEntryError, RenameEntryError, SetAccessError,
};
use crate::model::repository::{ProjectRole, UserRecord};
use crate::model::request::file_requests::{
    AddUrlRequest, CreateFolderRequest, MoveEntryRequest, RenameEntryRequest, SetAccessRequest,
};
use crate::model::request::FileUpload;
use crate::model::response::file_responses::{
    AddEntryResponse, DeleteEntryResponse, DownloadEntryResponse, GetEntryResponse,
    ListFolderResponse, MoveEntryResponse, RenameEntryResponse, SetAccessResponse,
};
use crate::model::response::BasicMessage;
use crate::service::file_service;

static BAD_CREDENTIALS: &str = "Bad Credentials";
static PROJECT_NOT_FOUND: &str = "The project with the passed id could not be found.";
static ENTRY_NOT_FOUND: &str = "The file or folder with the passed id could not be found.";
static DB_ERROR: &str = "Failed to talk to the database. Check the server logs for details.";

/// every route here authenticates the same way: validate the basic auth
/// header, then resolve what the caller may see or change within the project.
/// Mutations additionally require project membership, and the destructive ones
/// require the project admin role

#[get("/<project_id>/files?<folder>")]
pub fn list_folder(project_id: &str, folder: Option<&str>, auth: Auth) -> ListFolderResponse {
    let user = match auth.validate() {
        ValidateResult::Valid(user) => user,
        ValidateResult::Invalid => {
            return ListFolderResponse::Unauthorized(BAD_CREDENTIALS.to_string())
        }
    };
    let levels = match guard::authorized_levels(project_id, &user) {
        Ok(levels) => levels,
        Err(CapabilityError::ProjectNotFound) => {
            return ListFolderResponse::ProjectNotFound(BasicMessage::new(PROJECT_NOT_FOUND))
        }
        Err(CapabilityError::DbFailure) => {
            return ListFolderResponse::DbError(BasicMessage::new(DB_ERROR))
        }
    };
    match file_service::list_folder(project_id, folder.unwrap_or(""), &levels) {
        Ok(contents) => ListFolderResponse::Success(Json(contents)),
        Err(ListFolderError::FolderNotFound) => ListFolderResponse::FolderNotFound(
            BasicMessage::new("The folder with the passed id could not be found."),
        ),
        Err(ListFolderError::DbFailure) => ListFolderResponse::DbError(BasicMessage::new(DB_ERROR)),
    }
}

#[get("/<project_id>/files/<file_id>")]
pub fn get_entry(project_id: &str, file_id: &str, auth: Auth) -> GetEntryResponse {
    let user = match auth.validate() {
        ValidateResult::Valid(user) => user,
        ValidateResult::Invalid => {
            return GetEntryResponse::Unauthorized(BAD_CREDENTIALS.to_string())
        }
    };
    let levels = match guard::authorized_levels(project_id, &user) {
        Ok(levels) => levels,
        Err(CapabilityError::ProjectNotFound) => {
            return GetEntryResponse::ProjectNotFound(BasicMessage::new(PROJECT_NOT_FOUND))
        }
        Err(CapabilityError::DbFailure) => {
            return GetEntryResponse::DbError(BasicMessage::new(DB_ERROR))
        }
    };
    match file_service::get_entry(project_id, file_id, &levels) {
        Ok(entry) => GetEntryResponse::Success(Json(entry)),
        Err(GetEntryError::NotFound) => {
            GetEntryResponse::EntryNotFound(BasicMessage::new(ENTRY_NOT_FOUND))
        }
        Err(GetEntryError::DbFailure) => GetEntryResponse::DbError(BasicMessage::new(DB_ERROR)),
    }
}

#[get("/<project_id>/files/<file_id>/content")]
pub fn download_entry(project_id: &str, file_id: &str, auth: Auth) -> DownloadEntryResponse {
    let user = match auth.validate() {
        ValidateResult::Valid(user) => user,
        ValidateResult::Invalid => {
            return DownloadEntryResponse::Unauthorized(BAD_CREDENTIALS.to_string())
        }
    };
    let levels = match guard::authorized_levels(project_id, &user) {
        Ok(levels) => levels,
        Err(CapabilityError::ProjectNotFound) => {
            return DownloadEntryResponse::ProjectNotFound(BasicMessage::new(PROJECT_NOT_FOUND))
        }
        Err(CapabilityError::DbFailure) => {
            return DownloadEntryResponse::DbError(BasicMessage::new(DB_ERROR))
        }
    };
    match file_service::download_entry(project_id, file_id, &levels) {
        Ok((_, bytes)) => DownloadEntryResponse::Success(bytes),
        Err(DownloadEntryError::NotFound) => {
            DownloadEntryResponse::EntryNotFound(BasicMessage::new(ENTRY_NOT_FOUND))
        }
        Err(DownloadEntryError::NotDownloadable) => DownloadEntryResponse::NotDownloadable(
            BasicMessage::new("Folders and URL entries have no content to download."),
        ),
        Err(DownloadEntryError::DbFailure) => {
            DownloadEntryResponse::DbError(BasicMessage::new(DB_ERROR))
        }
        Err(DownloadEntryError::StorageFailure) => DownloadEntryResponse::StorageError(
            BasicMessage::new("Failed to read the stored content for that file."),
        ),
    }
}

#[post("/<project_id>/files", data = "<upload>")]
pub async fn upload_file(
    project_id: &str,
    upload: Form<FileUpload<'_>>,
    auth: Auth,
) -> AddEntryResponse {
    let user = match auth.validate() {
        ValidateResult::Valid(user) => user,
        ValidateResult::Invalid => {
            return AddEntryResponse::Unauthorized(BAD_CREDENTIALS.to_string())
        }
    };
    if let Err(response) = require_member(project_id, &user, add_entry_rejection) {
        return response;
    }
    let mut upload = upload.into_inner();
    match file_service::upload_file(project_id, &mut upload, user.username.as_str()).await {
        Ok(created) => AddEntryResponse::Created(Json(created)),
        Err(e) => add_entry_error(e),
    }
}

#[post("/<project_id>/files/folder", data = "<request>")]
pub fn create_folder(
    project_id: &str,
    request: Json<CreateFolderRequest>,
    auth: Auth,
) -> AddEntryResponse {
    let user = match auth.validate() {
        ValidateResult::Valid(user) => user,
        ValidateResult::Invalid => {
            return AddEntryResponse::Unauthorized(BAD_CREDENTIALS.to_string())
        }
    };
    if let Err(response) = require_member(project_id, &user, add_entry_rejection) {
        return response;
    }
    match file_service::create_folder(project_id, &request.into_inner(), user.username.as_str()) {
        Ok(created) => AddEntryResponse::Created(Json(created)),
        Err(e) => add_entry_error(e),
    }
}

#[post("/<project_id>/files/url", data = "<request>")]
pub fn add_url(project_id: &str, request: Json<AddUrlRequest>, auth: Auth) -> AddEntryResponse {
    let user = match auth.validate() {
        ValidateResult::Valid(user) => user,
        ValidateResult::Invalid => {
            return AddEntryResponse::Unauthorized(BAD_CREDENTIALS.to_string())
        }
    };
    if let Err(response) = require_member(project_id, &user, add_entry_rejection) {
        return response;
    }
    match file_service::add_url(project_id, &request.into_inner(), user.username.as_str()) {
        Ok(created) => AddEntryResponse::Created(Json(created)),
        Err(e) => add_entry_error(e),
    }
}

#[put("/<project_id>/files/<file_id>", data = "<request>")]
pub fn rename_entry(
    project_id: &str,
    file_id: &str,
    request: Json<RenameEntryRequest>,
    auth: Auth,
) -> RenameEntryResponse {
    let user = match auth.validate() {
        ValidateResult::Valid(user) => user,
        ValidateResult::Invalid => {
            return RenameEntryResponse::Unauthorized(BAD_CREDENTIALS.to_string())
        }
    };
    if let Err(response) = require_member(project_id, &user, rename_rejection) {
        return response;
    }
    match file_service::rename_entry(project_id, file_id, request.name.as_str()) {
        Ok(()) => RenameEntryResponse::Success(()),
        Err(RenameEntryError::NotFound) => {
            RenameEntryResponse::EntryNotFound(BasicMessage::new(ENTRY_NOT_FOUND))
        }
        Err(RenameEntryError::InvalidName) => RenameEntryResponse::BadRequest(BasicMessage::new(
            "That name is empty or contains disallowed characters.",
        )),
        Err(RenameEntryError::DbFailure) => {
            RenameEntryResponse::DbError(BasicMessage::new(DB_ERROR))
        }
    }
}

#[put("/<project_id>/files/<file_id>/move", data = "<request>")]
pub fn move_entry(
    project_id: &str,
    file_id: &str,
    request: Json<MoveEntryRequest>,
    auth: Auth,
) -> MoveEntryResponse {
    let user = match auth.validate() {
        ValidateResult::Valid(user) => user,
        ValidateResult::Invalid => {
            return MoveEntryResponse::Unauthorized(BAD_CREDENTIALS.to_string())
        }
    };
    if let Err(response) = require_member(project_id, &user, move_rejection) {
        return response;
    }
    match file_service::move_entry(project_id, file_id, request.new_parent.as_str()) {
        Ok(()) => MoveEntryResponse::Success(()),
        Err(MoveEntryError::NotFound) => {
            MoveEntryResponse::EntryNotFound(BasicMessage::new(ENTRY_NOT_FOUND))
        }
        Err(MoveEntryError::ParentNotFound) => MoveEntryResponse::ParentNotFound(
            BasicMessage::new("The destination folder could not be found."),
        ),
        Err(MoveEntryError::NotAllowed) => MoveEntryResponse::NotAllowed(BasicMessage::new(
            "An entry cannot be moved into itself, into its own subtree, or into a file.",
        )),
        Err(MoveEntryError::DbFailure) => MoveEntryResponse::DbError(BasicMessage::new(DB_ERROR)),
    }
}

#[put("/<project_id>/files/<file_id>/access", data = "<request>")]
pub fn set_entry_access(
    project_id: &str,
    file_id: &str,
    request: Json<SetAccessRequest>,
    auth: Auth,
) -> SetAccessResponse {
    let user = match auth.validate() {
        ValidateResult::Valid(user) => user,
        ValidateResult::Invalid => {
            return SetAccessResponse::Unauthorized(BAD_CREDENTIALS.to_string())
        }
    };
    if let Err(response) = require_admin(project_id, &user, set_access_rejection) {
        return response;
    }
    match file_service::set_entry_access(project_id, file_id, request.access.as_str()) {
        Ok(()) => SetAccessResponse::Success(()),
        Err(SetAccessError::NotFound) => {
            SetAccessResponse::EntryNotFound(BasicMessage::new(ENTRY_NOT_FOUND))
        }
        Err(SetAccessError::InvalidLevel) => SetAccessResponse::InvalidLevel(BasicMessage::new(
            "Access must be one of public, users, instructors, or team.",
        )),
        Err(SetAccessError::DbFailure) => SetAccessResponse::DbError(BasicMessage::new(DB_ERROR)),
    }
}

#[delete("/<project_id>/files/<file_id>")]
pub fn delete_entry(project_id: &str, file_id: &str, auth: Auth) -> DeleteEntryResponse {
    let user = match auth.validate() {
        ValidateResult::Valid(user) => user,
        ValidateResult::Invalid => {
            return DeleteEntryResponse::Unauthorized(BAD_CREDENTIALS.to_string())
        }
    };
    if let Err(response) = require_admin(project_id, &user, delete_rejection) {
        return response;
    }
    match file_service::delete_entry(project_id, file_id) {
        Ok(()) => DeleteEntryResponse::Success(()),
        Err(DeleteEntryError::NotFound) => {
            DeleteEntryResponse::EntryNotFound(BasicMessage::new(ENTRY_NOT_FOUND))
        }
        Err(DeleteEntryError::DbFailure) => {
            DeleteEntryResponse::DbError(BasicMessage::new(DB_ERROR))
        }
        Err(DeleteEntryError::StorageFailure) => DeleteEntryResponse::StorageError(
            BasicMessage::new("Failed to remove stored content; nothing was deleted."),
        ),
    }
}

// private functions

/// how a route turns a membership check failure into its own response type
enum Rejection {
    ProjectNotFound,
    DbError,
    Forbidden,
}

fn require_member<R>(
    project_id: &str,
    user: &UserRecord,
    reject: fn(Rejection) -> R,
) -> Result<(), R> {
    match guard::project_role(project_id, user.username.as_str()) {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(reject(Rejection::Forbidden)),
        Err(CapabilityError::ProjectNotFound) => Err(reject(Rejection::ProjectNotFound)),
        Err(CapabilityError::DbFailure) => Err(reject(Rejection::DbError)),
    }
}

fn require_admin<R>(
    project_id: &str,
    user: &UserRecord,
    reject: fn(Rejection) -> R,
) -> Result<(), R> {
    match guard::project_role(project_id, user.username.as_str()) {
        Ok(Some(ProjectRole::Admin)) => Ok(()),
        Ok(_) => Err(reject(Rejection::Forbidden)),
        Err(CapabilityError::ProjectNotFound) => Err(reject(Rejection::ProjectNotFound)),
        Err(CapabilityError::DbFailure) => Err(reject(Rejection::DbError)),
    }
}

static FORBIDDEN: &str = "You do not have the required role in this project.";

fn add_entry_rejection(rejection: Rejection) -> AddEntryResponse {
    match rejection {
        Rejection::ProjectNotFound => {
            AddEntryResponse::ProjectNotFound(BasicMessage::new(PROJECT_NOT_FOUND))
        }
        Rejection::DbError => AddEntryResponse::DbError(BasicMessage::new(DB_ERROR)),
        Rejection::Forbidden => AddEntryResponse::Forbidden(BasicMessage::new(FORBIDDEN)),
    }
}

fn rename_rejection(rejection: Rejection) -> RenameEntryResponse {
    match rejection {
        Rejection::ProjectNotFound => {
            RenameEntryResponse::ProjectNotFound(BasicMessage::new(PROJECT_NOT_FOUND))
        }
        Rejection::DbError => RenameEntryResponse::DbError(BasicMessage::new(DB_ERROR)),
        Rejection::Forbidden => RenameEntryResponse::Forbidden(BasicMessage::new(FORBIDDEN)),
    }
}

fn move_rejection(rejection: Rejection) -> MoveEntryResponse {
    match rejection {
        Rejection::ProjectNotFound => {
            MoveEntryResponse::ProjectNotFound(BasicMessage::new(PROJECT_NOT_FOUND))
        }
        Rejection::DbError => MoveEntryResponse::DbError(BasicMessage::new(DB_ERROR)),
        Rejection::Forbidden => MoveEntryResponse::Forbidden(BasicMessage::new(FORBIDDEN)),
    }
}

fn set_access_rejection(rejection: Rejection) -> SetAccessResponse {
    match rejection {
        Rejection::ProjectNotFound => {
            SetAccessResponse::ProjectNotFound(BasicMessage::new(PROJECT_NOT_FOUND))
        }
        Rejection::DbError => SetAccessResponse::DbError(BasicMessage::new(DB_ERROR)),
        Rejection::Forbidden => SetAccessResponse::Forbidden(BasicMessage::new(FORBIDDEN)),
    }
}

fn delete_rejection(rejection: Rejection) -> DeleteEntryResponse {
    match rejection {
        Rejection::ProjectNotFound => {
            DeleteEntryResponse::ProjectNotFound(BasicMessage::new(PROJECT_NOT_FOUND))
        }
        Rejection::DbError => DeleteEntryResponse::DbError(BasicMessage::new(DB_ERROR)),
        Rejection::Forbidden => DeleteEntryResponse::Forbidden(BasicMessage::new(FORBIDDEN)),
    }
}

fn add_entry_error(e: AddEntryError) -> AddEntryResponse {
    match e {
        AddEntryError::InvalidName => AddEntryResponse::BadRequest(BasicMessage::new(
            "That name is empty or contains disallowed characters.",
        )),
        AddEntryError::InvalidLevel => AddEntryResponse::BadRequest(BasicMessage::new(
            "Access must be one of public, users, instructors, or team.",
        )),
        AddEntryError::ParentNotFound => AddEntryResponse::ParentNotFound(BasicMessage::new(
            "The destination folder could not be found.",
        )),
        AddEntryError::ParentNotFolder => {
            AddEntryResponse::BadRequest(BasicMessage::new("The destination is not a folder."))
        }
        AddEntryError::DbFailure => AddEntryResponse::DbError(BasicMessage::new(DB_ERROR)),
        AddEntryError::StorageFailure => AddEntryResponse::StorageError(BasicMessage::new(
            "The entry was recorded but its content could not be stored.",
        )),
    }
}
