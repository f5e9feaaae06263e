use crate::guard;
use crate::model::error::user_errors::CreateUserError;
use crate::model::repository::{PlatformRole, UserRecord};
use crate::model::request::user_requests::CreateUserRequest;
use crate::repository;
use crate::repository::project_repository;

/// checks whether any account has been registered yet. A database failure
/// counts as "yes" so the open first-user window never reopens by accident
pub fn any_user_exists() -> bool {
    let con = repository::open_connection();
    let count = project_repository::count_users(&con);
    con.close().unwrap();
    match count {
        Ok(count) => count > 0,
        Err(e) => {
            log::error!(
                "Failed to count users in database! Nested exception is: \n {:?}",
                e
            );
            true
        }
    }
}

pub fn create_user(request: &CreateUserRequest) -> Result<(), CreateUserError> {
    let username = request.username.trim();
    if username.is_empty() || request.password.trim().is_empty() {
        return Err(CreateUserError::InvalidRequest);
    }
    let role = match request.role.as_deref() {
        None => PlatformRole::User,
        Some(raw) => PlatformRole::parse(raw).ok_or(CreateUserError::InvalidRequest)?,
    };
    let con = repository::open_connection();
    let existing = project_repository::get_user(username, &con);
    let result = match existing {
        Ok(_) => Err(CreateUserError::AlreadyExists),
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            let record = UserRecord {
                username: username.to_string(),
                password_digest: guard::password_digest(username, request.password.trim()),
                role,
            };
            project_repository::create_user(&record, &con).map_err(|e| {
                log::error!(
                    "Failed to save user to database! Nested exception is: \n {:?}",
                    e
                );
                CreateUserError::DbFailure
            })
        }
        Err(e) => {
            log::error!(
                "Failed to look up user in database! Nested exception is: \n {:?}",
                e
            );
            Err(CreateUserError::DbFailure)
        }
    };
    con.close().unwrap();
    result
}
