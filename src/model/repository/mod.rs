use chrono::NaiveDateTime;
use rocket::serde::{Deserialize, Serialize};

/// whether an entry is an actual file or a folder grouping other entries
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum StorageType {
    File,
    Folder,
}

impl StorageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageType::File => "file",
            StorageType::Folder => "folder",
        }
    }

    pub fn parse(value: &str) -> Option<StorageType> {
        match value {
            "file" => Some(StorageType::File),
            "folder" => Some(StorageType::Folder),
            _ => None,
        }
    }
}

/// the visibility of an entry. Files carry an explicitly chosen value; folder
/// values are always derived from their descendants, with [`AccessLevel::Mixed`]
/// marking a folder whose descendants disagree
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum AccessLevel {
    Public,
    Users,
    Instructors,
    Team,
    Mixed,
}

impl AccessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::Public => "public",
            AccessLevel::Users => "users",
            AccessLevel::Instructors => "instructors",
            AccessLevel::Team => "team",
            AccessLevel::Mixed => "mixed",
        }
    }

    pub fn parse(value: &str) -> Option<AccessLevel> {
        match value {
            "public" => Some(AccessLevel::Public),
            "users" => Some(AccessLevel::Users),
            "instructors" => Some(AccessLevel::Instructors),
            "team" => Some(AccessLevel::Team),
            "mixed" => Some(AccessLevel::Mixed),
            _ => None,
        }
    }
}

/// one row of a project's flat file set. `parent` holds the `file_id` of the
/// containing folder, or an empty string for entries at the project root
#[derive(Debug, PartialEq, Clone)]
pub struct FileEntry {
    pub project_id: String,
    /// opaque identifier, stable for the entry's lifetime and unique within the project
    pub file_id: String,
    pub name: String,
    pub storage_type: StorageType,
    /// `file_id` of the containing folder, `""` if at the project root
    pub parent: String,
    pub access: AccessLevel,
    /// byte size; 0 for folders and URL entries
    pub size: u64,
    /// when set, the entry is an external link and has no stored body
    pub is_url: bool,
    pub url: Option<String>,
    pub license: Option<String>,
    pub authors: Vec<String>,
    pub publisher: Option<String>,
    pub description: Option<String>,
    pub mime_type: Option<String>,
    pub version: u32,
    pub download_count: u64,
    pub created_by: String,
    pub created_at: NaiveDateTime,
}

impl FileEntry {
    pub fn is_folder(&self) -> bool {
        self.storage_type == StorageType::Folder
    }
}

/// platform-wide role of a user, separate from per-project membership
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PlatformRole {
    Admin,
    Instructor,
    User,
}

impl PlatformRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformRole::Admin => "admin",
            PlatformRole::Instructor => "instructor",
            PlatformRole::User => "user",
        }
    }

    pub fn parse(value: &str) -> Option<PlatformRole> {
        match value {
            "admin" => Some(PlatformRole::Admin),
            "instructor" => Some(PlatformRole::Instructor),
            "user" => Some(PlatformRole::User),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct UserRecord {
    pub username: String,
    /// sha256 digest of `username:password`
    pub password_digest: String,
    pub role: PlatformRole,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Project {
    pub project_id: String,
    pub title: String,
}

/// role of a user within one project
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ProjectRole {
    Member,
    Admin,
}

impl ProjectRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectRole::Member => "member",
            ProjectRole::Admin => "admin",
        }
    }

    pub fn parse(value: &str) -> Option<ProjectRole> {
        match value {
            "member" => Some(ProjectRole::Member),
            "admin" => Some(ProjectRole::Admin),
            _ => None,
        }
    }
}
