mod file_handler_tests;

use std::fs::{remove_dir_all, remove_file};
use std::path::Path;

use chrono::NaiveDate;

use crate::model::repository::{
    AccessLevel, FileEntry, Project, ProjectRole, StorageType, UserRecord,
};
use crate::repository::{
    file_set_repository, initialize_db, open_connection, project_repository,
};
use crate::storage;

/// username:password
#[cfg(test)]
pub static AUTH: &str = "Basic dXNlcm5hbWU6cGFzc3dvcmQ=";

#[cfg(test)]
pub fn current_thread_name() -> String {
    let current_thread = std::thread::current();
    current_thread.name().unwrap().to_string()
}

#[cfg(test)]
pub fn refresh_db() {
    let thread_name = current_thread_name();
    remove_file(Path::new(format!("{thread_name}.sqlite").as_str())).unwrap_or(());
    initialize_db().unwrap();
}

#[cfg(test)]
pub fn cleanup_storage() {
    remove_dir_all(Path::new(storage::storage_root().as_str())).unwrap_or(());
}

#[cfg(test)]
pub fn cleanup() {
    let thread_name = current_thread_name();
    cleanup_storage();
    remove_file(Path::new(format!("{thread_name}.sqlite").as_str())).unwrap_or(());
}

/// a minimal file set row; metadata fields not under test get fixed values
#[cfg(test)]
pub fn entry(
    project_id: &str,
    file_id: &str,
    name: &str,
    storage_type: StorageType,
    parent: &str,
    access: AccessLevel,
) -> FileEntry {
    FileEntry {
        project_id: project_id.to_string(),
        file_id: file_id.to_string(),
        name: name.to_string(),
        storage_type,
        parent: parent.to_string(),
        access,
        size: 0,
        is_url: false,
        url: None,
        license: None,
        authors: Vec::new(),
        publisher: None,
        description: None,
        mime_type: None,
        version: 1,
        download_count: 0,
        created_by: "username".to_string(),
        created_at: NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
    }
}

#[cfg(test)]
pub fn url_entry(
    project_id: &str,
    file_id: &str,
    name: &str,
    parent: &str,
    access: AccessLevel,
) -> FileEntry {
    let mut e = entry(project_id, file_id, name, StorageType::File, parent, access);
    e.is_url = true;
    e.url = Some("https://example.org".to_string());
    e
}

#[cfg(test)]
pub fn create_user_db_entry(username: &str, password: &str) {
    let connection = open_connection();
    project_repository::create_user(
        &UserRecord {
            username: username.to_string(),
            password_digest: crate::guard::password_digest(username, password),
            role: crate::model::repository::PlatformRole::User,
        },
        &connection,
    )
    .unwrap();
    connection.close().unwrap();
}

#[cfg(test)]
pub fn create_project_db_entry(project_id: &str, title: &str) {
    let connection = open_connection();
    project_repository::create_project(
        &Project {
            project_id: project_id.to_string(),
            title: title.to_string(),
        },
        &connection,
    )
    .unwrap();
    connection.close().unwrap();
}

#[cfg(test)]
pub fn add_member_db_entry(project_id: &str, username: &str, role: ProjectRole) {
    let connection = open_connection();
    project_repository::add_member(project_id, username, role, &connection).unwrap();
    connection.close().unwrap();
}

/// writes a whole file set for a project, as the mutation operations do
#[cfg(test)]
pub fn save_set_db(project_id: &str, entries: Vec<FileEntry>) {
    let mut connection = open_connection();
    file_set_repository::save_file_set(project_id, &entries, &mut connection).unwrap();
    connection.close().unwrap();
}
