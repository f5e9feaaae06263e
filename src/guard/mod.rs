use std::collections::HashSet;
use std::io::Write;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rocket::async_trait;
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::Request;
use sha2::{Digest, Sha256};

use crate::model::repository::{AccessLevel, PlatformRole, ProjectRole, UserRecord};
use crate::repository;
use crate::repository::project_repository;

/// used to represent the result of calling `Auth::validate`
pub enum ValidateResult {
    /// the credentials matched a known user
    Valid(UserRecord),
    Invalid,
}

#[derive(Debug)]
pub struct Auth {
    pub username: String,
    pub password: String,
}

impl Auth {
    /// creates an `Auth` object from the passed header value.
    /// The value of header must be base64-encoded basic auth.
    pub fn from(header: &str) -> Result<Auth, &str> {
        // remove the "Basic " from the header, leaving only the base64 part
        let stripped_header = header.to_string().replace("Basic ", "");
        match STANDARD.decode(stripped_header.as_str()) {
            Ok(value) => {
                let combined = String::from_utf8(value).unwrap();
                let split = combined.split(':').collect::<Vec<&str>>();
                // if there aren't exactly 2 parts, then something is wrong here
                if split.len() != 2 || split.contains(&"") {
                    return Err("Invalid basic auth format: missing username or password");
                }
                Ok(Auth {
                    username: String::from(split[0].trim()),
                    password: String::from(split[1].trim()),
                })
            }
            Err(_) => Err("Invalid basic auth format: not base64"),
        }
    }

    /// compares our digest with the one stored for the claimed user.
    ///
    /// _this is a convenience method to be used only in handlers_
    pub fn validate(&self) -> ValidateResult {
        let con = repository::open_connection();
        let user = project_repository::get_user(self.username.as_str(), &con);
        con.close().unwrap();
        match user {
            Ok(record)
                if record.password_digest
                    == password_digest(self.username.as_str(), self.password.as_str()) =>
            {
                ValidateResult::Valid(record)
            }
            Ok(_) | Err(rusqlite::Error::QueryReturnedNoRows) => ValidateResult::Invalid,
            Err(e) => {
                log::error!(
                    "Failed to look up user for auth check! Nested exception is: \n {:?}",
                    e
                );
                ValidateResult::Invalid
            }
        }
    }
}

/// sha256 digest of `username:password`, the form stored in the users table
pub fn password_digest(username: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    let combined = format!("{}:{}", username.trim(), password.trim());
    hasher.write_all(combined.as_bytes()).unwrap();
    format!("{:x}", hasher.finalize())
}

#[async_trait]
impl<'a> FromRequest<'a> for Auth {
    type Error = AuthError;

    async fn from_request(request: &'a Request<'_>) -> Outcome<Self, Self::Error> {
        // just check if it's basic auth
        fn check_basic_auth(value: &str) -> bool {
            String::from(value).starts_with("Basic")
        }
        match request.headers().get_one("Authorization") {
            None => Outcome::Error((Status::Unauthorized, AuthError::Missing)),
            Some(value) if check_basic_auth(value) => match Auth::from(value) {
                Ok(auth) => Outcome::Success(auth),
                Err(_) => Outcome::Error((Status::Unauthorized, AuthError::Invalid)),
            },
            Some(_) => Outcome::Error((Status::BadRequest, AuthError::Invalid)),
        }
    }
}

#[derive(Debug)]
pub enum AuthError {
    Missing,
    Invalid,
}

#[derive(PartialEq, Debug)]
pub enum CapabilityError {
    ProjectNotFound,
    DbFailure,
}

/// the set of access levels whose entries the user may see within the project.
/// Project members and admins see everything including derived mixed folders;
/// platform instructors outside the project additionally see instructor
/// material; everyone else sees public and users-level entries only
pub fn authorized_levels(
    project_id: &str,
    user: &UserRecord,
) -> Result<HashSet<AccessLevel>, CapabilityError> {
    let membership = project_role(project_id, user.username.as_str())?;
    let levels = if membership.is_some() || user.role == PlatformRole::Admin {
        HashSet::from([
            AccessLevel::Public,
            AccessLevel::Users,
            AccessLevel::Instructors,
            AccessLevel::Team,
            AccessLevel::Mixed,
        ])
    } else if user.role == PlatformRole::Instructor {
        HashSet::from([
            AccessLevel::Public,
            AccessLevel::Users,
            AccessLevel::Instructors,
        ])
    } else {
        HashSet::from([AccessLevel::Public, AccessLevel::Users])
    };
    Ok(levels)
}

/// the user's role within the project, or `None` when they are not a member.
/// Fails with [`CapabilityError::ProjectNotFound`] if the project itself does
/// not exist, so handlers can 404 before touching the file set
pub fn project_role(
    project_id: &str,
    username: &str,
) -> Result<Option<ProjectRole>, CapabilityError> {
    let con = repository::open_connection();
    let project = project_repository::get_project(project_id, &con);
    let result = match project {
        Ok(_) => project_repository::get_member_role(project_id, username, &con).map_err(|e| {
            log::error!(
                "Failed to look up project membership! Nested exception is: \n {:?}",
                e
            );
            CapabilityError::DbFailure
        }),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(CapabilityError::ProjectNotFound),
        Err(e) => {
            log::error!(
                "Failed to look up project! Nested exception is: \n {:?}",
                e
            );
            Err(CapabilityError::DbFailure)
        }
    };
    con.close().unwrap();
    result
}


#[cfg(test)]
mod capability_tests {
    use crate::model::repository::{AccessLevel, PlatformRole, ProjectRole, UserRecord};
    use crate::test::{add_member_db_entry, create_project_db_entry, create_user_db_entry, refresh_db};

    use super::{authorized_levels, project_role, CapabilityError};

    fn user(username: &str, role: PlatformRole) -> UserRecord {
        UserRecord {
            username: username.to_string(),
            password_digest: String::new(),
            role,
        }
    }

    #[test]
    fn missing_project_is_not_found() {
        refresh_db();
        assert_eq!(
            Err(CapabilityError::ProjectNotFound),
            project_role("nope", "alice")
        );
    }

    #[test]
    fn non_member_has_no_project_role() {
        refresh_db();
        create_project_db_entry("p1", "Test Project");
        assert_eq!(Ok(None), project_role("p1", "alice"));
    }

    #[test]
    fn member_sees_every_level() {
        refresh_db();
        create_project_db_entry("p1", "Test Project");
        create_user_db_entry("alice", "password");
        add_member_db_entry("p1", "alice", ProjectRole::Member);
        let levels = authorized_levels("p1", &user("alice", PlatformRole::User)).unwrap();
        assert_eq!(5, levels.len());
    }

    #[test]
    fn outside_instructor_sees_instructor_material_but_not_team() {
        refresh_db();
        create_project_db_entry("p1", "Test Project");
        let levels = authorized_levels("p1", &user("bob", PlatformRole::Instructor)).unwrap();
        assert!(levels.contains(&AccessLevel::Instructors));
        assert!(!levels.contains(&AccessLevel::Team));
        assert!(!levels.contains(&AccessLevel::Mixed));
    }

    #[test]
    fn outside_user_sees_public_and_users_only() {
        refresh_db();
        create_project_db_entry("p1", "Test Project");
        let levels = authorized_levels("p1", &user("bob", PlatformRole::User)).unwrap();
        assert_eq!(2, levels.len());
        assert!(levels.contains(&AccessLevel::Public));
        assert!(levels.contains(&AccessLevel::Users));
    }
}
