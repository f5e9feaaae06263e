use std::collections::HashSet;

use uuid::Uuid;

use crate::model::api;
use crate::model::error::file_errors::{
    AddEntryError, DeleteEntryError, DownloadEntryError, GetEntryError, ListFolderError,
    MoveEntryError, RenameEntryError, SetAccessError,
};
use crate::model::repository::{AccessLevel, FileEntry, StorageType};
use crate::model::request::file_requests::{AddUrlRequest, CreateFolderRequest};
use crate::model::request::FileUpload;
use crate::model::response::file_responses::{
    EntryResponse, FileTreeNode, FolderContentsResponse,
};
use crate::repository::file_set_repository;
use crate::service::{access_service, tree_service};
use crate::{repository, storage};

/// every operation here follows the same shape: pull the project's whole flat
/// file set, validate and transform it in memory, re-derive folder access
/// levels where the change could have disturbed them, then write the whole set
/// back in one shot. Object-storage side effects ride alongside the metadata
/// write with no transactional link between the two

pub fn list_folder(
    project_id: &str,
    folder_id: &str,
    levels: &HashSet<AccessLevel>,
) -> Result<FolderContentsResponse, ListFolderError> {
    let entries = load_set(project_id).map_err(|_| ListFolderError::DbFailure)?;
    tree_service::folder_contents(&entries, folder_id, levels)
        .map_err(|_| ListFolderError::FolderNotFound)
}

pub fn get_entry(
    project_id: &str,
    file_id: &str,
    levels: &HashSet<AccessLevel>,
) -> Result<EntryResponse, GetEntryError> {
    let entries = load_set(project_id).map_err(|_| GetEntryError::DbFailure)?;
    tree_service::entry_with_path(&entries, file_id, levels).map_err(|_| GetEntryError::NotFound)
}

/// reads a stored body back and bumps the entry's download counter. URL
/// entries have no body and folders cannot be downloaded at all
pub fn download_entry(
    project_id: &str,
    file_id: &str,
    levels: &HashSet<AccessLevel>,
) -> Result<(FileEntry, Vec<u8>), DownloadEntryError> {
    let entries = load_set(project_id).map_err(|_| DownloadEntryError::DbFailure)?;
    let entry = entries
        .iter()
        .filter(|e| levels.contains(&e.access))
        .find(|e| e.file_id == file_id)
        .cloned()
        .ok_or(DownloadEntryError::NotFound)?;
    if entry.is_folder() || entry.is_url {
        return Err(DownloadEntryError::NotDownloadable);
    }
    let bytes = storage::read_object(project_id, file_id)
        .map_err(|_| DownloadEntryError::StorageFailure)?;
    let updated: Vec<FileEntry> = entries
        .iter()
        .map(|e| {
            if e.file_id == file_id {
                let mut bumped = e.clone();
                bumped.download_count += 1;
                bumped
            } else {
                e.clone()
            }
        })
        .collect();
    save_set(project_id, &updated).map_err(|_| DownloadEntryError::DbFailure)?;
    Ok((entry, bytes))
}

/// stores an uploaded file: metadata first, body second. If the body write
/// fails the metadata entry stays behind, pointing at a body that never landed
pub async fn upload_file(
    project_id: &str,
    upload: &mut FileUpload<'_>,
    created_by: &str,
) -> Result<FileTreeNode, AddEntryError> {
    let name = api::entry_name(upload.name.as_str()).ok_or(AddEntryError::InvalidName)?;
    let access = requested_access(upload.access.as_deref())?;
    let parent = normalize_parent(upload.parent.as_deref());
    let mut entries = load_set(project_id).map_err(|_| AddEntryError::DbFailure)?;
    check_parent(&entries, parent.as_str())?;
    let file_id = Uuid::new_v4().to_string();
    let entry = FileEntry {
        project_id: project_id.to_string(),
        file_id: file_id.clone(),
        name,
        storage_type: StorageType::File,
        parent,
        access,
        size: upload.file.len(),
        is_url: false,
        url: None,
        license: None,
        authors: Vec::new(),
        publisher: None,
        description: None,
        mime_type: upload.file.content_type().map(|ct| ct.to_string()),
        version: 1,
        download_count: 0,
        created_by: created_by.to_string(),
        created_at: chrono::offset::Local::now().naive_local(),
    };
    entries.push(entry.clone());
    let entries = access_service::propagate(&entries);
    save_set(project_id, &entries).map_err(|_| AddEntryError::DbFailure)?;
    if storage::put_object(project_id, file_id.as_str(), &mut upload.file)
        .await
        .is_err()
    {
        return Err(AddEntryError::StorageFailure);
    }
    Ok(FileTreeNode::from(&entry))
}

/// adds an entry that is an external link rather than a stored body
pub fn add_url(
    project_id: &str,
    request: &AddUrlRequest,
    created_by: &str,
) -> Result<FileTreeNode, AddEntryError> {
    let name = api::entry_name(request.name.as_str()).ok_or(AddEntryError::InvalidName)?;
    if request.url.trim().is_empty() {
        return Err(AddEntryError::InvalidName);
    }
    let access = requested_access(request.access.as_deref())?;
    let parent = normalize_parent(request.parent.as_deref());
    let mut entries = load_set(project_id).map_err(|_| AddEntryError::DbFailure)?;
    check_parent(&entries, parent.as_str())?;
    let entry = FileEntry {
        project_id: project_id.to_string(),
        file_id: Uuid::new_v4().to_string(),
        name,
        storage_type: StorageType::File,
        parent,
        access,
        size: 0,
        is_url: true,
        url: Some(request.url.clone()),
        license: None,
        authors: Vec::new(),
        publisher: None,
        description: request.description.clone(),
        mime_type: None,
        version: 1,
        download_count: 0,
        created_by: created_by.to_string(),
        created_at: chrono::offset::Local::now().naive_local(),
    };
    entries.push(entry.clone());
    let entries = access_service::propagate(&entries);
    save_set(project_id, &entries).map_err(|_| AddEntryError::DbFailure)?;
    Ok(FileTreeNode::from(&entry))
}

pub fn create_folder(
    project_id: &str,
    request: &CreateFolderRequest,
    created_by: &str,
) -> Result<FileTreeNode, AddEntryError> {
    let name = api::entry_name(request.name.as_str()).ok_or(AddEntryError::InvalidName)?;
    let parent = normalize_parent(request.parent.as_deref());
    let mut entries = load_set(project_id).map_err(|_| AddEntryError::DbFailure)?;
    check_parent(&entries, parent.as_str())?;
    let entry = FileEntry {
        project_id: project_id.to_string(),
        file_id: Uuid::new_v4().to_string(),
        name,
        storage_type: StorageType::Folder,
        parent,
        access: AccessLevel::Team,
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
        created_by: created_by.to_string(),
        created_at: chrono::offset::Local::now().naive_local(),
    };
    entries.push(entry.clone());
    let entries = access_service::propagate(&entries);
    save_set(project_id, &entries).map_err(|_| AddEntryError::DbFailure)?;
    Ok(FileTreeNode::from(&entry))
}

/// renames touch only display metadata; object bodies are keyed by id and no
/// folder aggregate can change, so there is nothing to re-derive
pub fn rename_entry(
    project_id: &str,
    file_id: &str,
    new_name: &str,
) -> Result<(), RenameEntryError> {
    let name = api::entry_name(new_name).ok_or(RenameEntryError::InvalidName)?;
    let entries = load_set(project_id).map_err(|_| RenameEntryError::DbFailure)?;
    if !entries.iter().any(|e| e.file_id == file_id) {
        return Err(RenameEntryError::NotFound);
    }
    let updated: Vec<FileEntry> = entries
        .iter()
        .map(|e| {
            if e.file_id == file_id {
                let mut renamed = e.clone();
                renamed.name = name.clone();
                renamed
            } else {
                e.clone()
            }
        })
        .collect();
    save_set(project_id, &updated).map_err(|_| RenameEntryError::DbFailure)
}

pub fn move_entry(
    project_id: &str,
    file_id: &str,
    new_parent: &str,
) -> Result<(), MoveEntryError> {
    let entries = load_set(project_id).map_err(|_| MoveEntryError::DbFailure)?;
    if !entries.iter().any(|e| e.file_id == file_id) {
        return Err(MoveEntryError::NotFound);
    }
    if new_parent == file_id {
        return Err(MoveEntryError::NotAllowed);
    }
    if !new_parent.is_empty() {
        let destination = entries
            .iter()
            .find(|e| e.file_id == new_parent)
            .ok_or(MoveEntryError::ParentNotFound)?;
        if !destination.is_folder() {
            // files cannot contain children
            return Err(MoveEntryError::NotAllowed);
        }
        if descendant_ids(&entries, file_id).contains(new_parent) {
            // moving a folder into its own subtree would orphan the whole branch
            return Err(MoveEntryError::NotAllowed);
        }
    }
    let updated: Vec<FileEntry> = entries
        .iter()
        .map(|e| {
            if e.file_id == file_id {
                let mut moved = e.clone();
                moved.parent = new_parent.to_string();
                moved
            } else {
                e.clone()
            }
        })
        .collect();
    let updated = access_service::propagate(&updated);
    save_set(project_id, &updated).map_err(|_| MoveEntryError::DbFailure)
}

/// applies an explicit access level to an entry. For a folder the level is
/// pushed down to every transitive descendant before the folder aggregates are
/// re-derived, so the whole subtree converges to the requested value
pub fn set_entry_access(
    project_id: &str,
    file_id: &str,
    raw_level: &str,
) -> Result<(), SetAccessError> {
    let level = match AccessLevel::parse(raw_level) {
        Some(AccessLevel::Mixed) | None => return Err(SetAccessError::InvalidLevel),
        Some(explicit) => explicit,
    };
    let entries = load_set(project_id).map_err(|_| SetAccessError::DbFailure)?;
    let entry = entries
        .iter()
        .find(|e| e.file_id == file_id)
        .ok_or(SetAccessError::NotFound)?;
    let mut targets: HashSet<String> = HashSet::new();
    targets.insert(file_id.to_string());
    if entry.is_folder() {
        targets.extend(descendant_ids(&entries, file_id));
    }
    let updated: Vec<FileEntry> = entries
        .iter()
        .map(|e| {
            if targets.contains(e.file_id.as_str()) {
                let mut changed = e.clone();
                changed.access = level;
                changed
            } else {
                e.clone()
            }
        })
        .collect();
    let updated = access_service::propagate(&updated);
    save_set(project_id, &updated).map_err(|_| SetAccessError::DbFailure)
}

/// removes an entry and, for folders, every transitive descendant with it.
/// Stored bodies for the doomed subtree go first in one batch; if any of them
/// cannot be removed the metadata set is left untouched
pub fn delete_entry(project_id: &str, file_id: &str) -> Result<(), DeleteEntryError> {
    let entries = load_set(project_id).map_err(|_| DeleteEntryError::DbFailure)?;
    if !entries.iter().any(|e| e.file_id == file_id) {
        return Err(DeleteEntryError::NotFound);
    }
    let mut doomed = descendant_ids(&entries, file_id);
    doomed.insert(file_id.to_string());
    let stored_bodies: Vec<String> = entries
        .iter()
        .filter(|e| {
            doomed.contains(e.file_id.as_str()) && e.storage_type == StorageType::File && !e.is_url
        })
        .map(|e| e.file_id.clone())
        .collect();
    if let Err(failed) = storage::delete_objects(project_id, &stored_bodies) {
        log::error!(
            "Batch object delete left {} of {} bodies in place for project {project_id}",
            failed.len(),
            stored_bodies.len()
        );
        return Err(DeleteEntryError::StorageFailure);
    }
    let remaining: Vec<FileEntry> = entries
        .iter()
        .filter(|e| !doomed.contains(e.file_id.as_str()))
        .cloned()
        .collect();
    let remaining = access_service::propagate(&remaining);
    save_set(project_id, &remaining).map_err(|_| DeleteEntryError::DbFailure)
}

// private functions

fn load_set(project_id: &str) -> Result<Vec<FileEntry>, rusqlite::Error> {
    let con = repository::open_connection();
    let result = file_set_repository::load_file_set(project_id, &con);
    con.close().unwrap();
    if let Err(e) = &result {
        log::error!(
            "Failed to pull file set from database! Nested exception is: \n {:?}",
            e
        );
    }
    result
}

fn save_set(project_id: &str, entries: &[FileEntry]) -> Result<(), rusqlite::Error> {
    let mut con = repository::open_connection();
    let result = file_set_repository::save_file_set(project_id, entries, &mut con);
    con.close().unwrap();
    if let Err(e) = &result {
        log::error!(
            "Failed to write file set to database! Nested exception is: \n {:?}",
            e
        );
    }
    result
}

/// the client may omit the parent or send an empty string; both mean the project root
fn normalize_parent(parent: Option<&str>) -> String {
    parent.unwrap_or("").trim().to_string()
}

fn check_parent(entries: &[FileEntry], parent: &str) -> Result<(), AddEntryError> {
    if parent.is_empty() {
        return Ok(());
    }
    match entries.iter().find(|e| e.file_id == parent) {
        None => Err(AddEntryError::ParentNotFound),
        Some(destination) if !destination.is_folder() => Err(AddEntryError::ParentNotFolder),
        Some(_) => Ok(()),
    }
}

fn requested_access(raw: Option<&str>) -> Result<AccessLevel, AddEntryError> {
    match raw {
        None => Ok(AccessLevel::Team),
        Some(value) => match AccessLevel::parse(value) {
            // mixed is derived, never authored
            Some(AccessLevel::Mixed) | None => Err(AddEntryError::InvalidLevel),
            Some(explicit) => Ok(explicit),
        },
    }
}

/// every transitive descendant of an entry, found by recursive parent-matching
fn descendant_ids(entries: &[FileEntry], root: &str) -> HashSet<String> {
    let mut ids = HashSet::new();
    collect_descendants(entries, root, &mut ids);
    ids
}

fn collect_descendants(entries: &[FileEntry], parent: &str, ids: &mut HashSet<String>) {
    for entry in entries.iter().filter(|e| e.parent == parent) {
        if ids.insert(entry.file_id.clone()) && entry.is_folder() {
            collect_descendants(entries, entry.file_id.as_str(), ids);
        }
    }
}


#[cfg(test)]
mod set_access_tests {
    use crate::model::error::file_errors::SetAccessError;
    use crate::model::repository::{AccessLevel, StorageType};
    use crate::test::{create_project_db_entry, entry, refresh_db, save_set_db};

    use super::set_entry_access;

    fn seed() {
        refresh_db();
        create_project_db_entry("p1", "Test Project");
        save_set_db(
            "p1",
            vec![
                entry("p1", "a", "unit", StorageType::Folder, "", AccessLevel::Mixed),
                entry("p1", "b", "open.pdf", StorageType::File, "a", AccessLevel::Public),
                entry("p1", "c", "draft.docx", StorageType::File, "a", AccessLevel::Team),
            ],
        );
    }

    #[test]
    fn mixed_is_never_accepted_as_an_input() {
        seed();
        assert_eq!(
            Err(SetAccessError::InvalidLevel),
            set_entry_access("p1", "b", "mixed")
        );
        assert_eq!(
            Err(SetAccessError::InvalidLevel),
            set_entry_access("p1", "b", "everyone")
        );
    }

    #[test]
    fn missing_entry_is_not_found() {
        seed();
        assert_eq!(
            Err(SetAccessError::NotFound),
            set_entry_access("p1", "nope", "public")
        );
    }

    #[test]
    fn changing_a_file_rederives_its_ancestors() {
        seed();
        set_entry_access("p1", "c", "public").unwrap();
        let entries = super::load_set("p1").unwrap();
        let folder = entries.iter().find(|e| e.file_id == "a").unwrap();
        assert_eq!(AccessLevel::Public, folder.access);
    }

    #[test]
    fn changing_a_folder_pushes_the_level_through_the_subtree() {
        seed();
        set_entry_access("p1", "a", "instructors").unwrap();
        let entries = super::load_set("p1").unwrap();
        for id in ["a", "b", "c"] {
            let e = entries.iter().find(|e| e.file_id == id).unwrap();
            assert_eq!(AccessLevel::Instructors, e.access);
        }
    }
}




#[cfg(test)]
mod download_entry_tests {
    use std::collections::HashSet;

    use crate::model::error::file_errors::DownloadEntryError;
    use crate::model::repository::{AccessLevel, StorageType};
    use crate::storage;
    use crate::test::{
        cleanup_storage, create_project_db_entry, entry, refresh_db, save_set_db, url_entry,
    };

    use super::download_entry;

    fn levels() -> HashSet<AccessLevel> {
        HashSet::from([AccessLevel::Team])
    }

    fn seed() {
        refresh_db();
        cleanup_storage();
        create_project_db_entry("p1", "Test Project");
        save_set_db(
            "p1",
            vec![
                entry("p1", "a", "notes.md", StorageType::File, "", AccessLevel::Team),
                url_entry("p1", "b", "reading link", "", AccessLevel::Team),
            ],
        );
        storage::write_object_direct("p1", "a", "hello");
    }

    #[test]
    fn returns_the_stored_body_and_bumps_the_counter() {
        seed();
        let (file, bytes) = download_entry("p1", "a", &levels()).unwrap();
        assert_eq!(b"hello".to_vec(), bytes);
        assert_eq!("notes.md", file.name);
        let entries = super::load_set("p1").unwrap();
        let counted = entries.iter().find(|e| e.file_id == "a").unwrap();
        assert_eq!(1, counted.download_count);
    }

    #[test]
    fn url_entries_are_not_downloadable() {
        seed();
        assert_eq!(
            Err(DownloadEntryError::NotDownloadable),
            download_entry("p1", "b", &levels())
        );
    }

    #[test]
    fn hidden_entries_are_not_found() {
        seed();
        let public_only = HashSet::from([AccessLevel::Public]);
        assert_eq!(
            Err(DownloadEntryError::NotFound),
            download_entry("p1", "a", &public_only)
        );
    }
}
