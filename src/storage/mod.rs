use std::fs;
use std::path::{Path, PathBuf};

use rocket::fs::TempFile;

/// failures talking to the object store. The store is advisory-only from the
/// metadata's point of view: callers report these without rolling back any
/// metadata write that already happened
#[derive(PartialEq, Debug)]
pub enum ObjectStorageError {
    WriteFailure,
    ReadFailure,
}

#[cfg(not(test))]
pub fn storage_root() -> String {
    use crate::config::CONDUCTOR_CONFIG;
    CONDUCTOR_CONFIG.clone().storage.location
}

#[cfg(test)]
pub fn storage_root() -> String {
    format!("./{}_objects", crate::test::current_thread_name())
}

/// ensures that the storage root exists on the file system
pub fn check_storage_root() {
    let root = storage_root();
    let path = Path::new(root.as_str());
    if !path.exists() {
        match fs::create_dir_all(path) {
            Ok(_) => (),
            Err(e) => panic!("Failed to create object storage root: \n {:?}", e),
        }
    }
}

/// objects are keyed `{project_id}/{file_id}`; display names never appear on
/// disk, so renames touch no stored bodies
fn object_path(project_id: &str, file_id: &str) -> PathBuf {
    Path::new(storage_root().as_str())
        .join(project_id)
        .join(file_id)
}

/// writes an uploaded body under the project's key space. Copies instead of
/// persisting in place so the upload temp dir and the storage root can live on
/// different file systems
pub async fn put_object(
    project_id: &str,
    file_id: &str,
    file: &mut TempFile<'_>,
) -> Result<(), ObjectStorageError> {
    let project_dir = Path::new(storage_root().as_str()).join(project_id);
    if let Err(e) = fs::create_dir_all(&project_dir) {
        log::error!(
            "Failed to create project storage directory! Nested exception is: \n {:?}",
            e
        );
        return Err(ObjectStorageError::WriteFailure);
    }
    match file.copy_to(object_path(project_id, file_id)).await {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!(
                "Failed to write object body to storage! Nested exception is: \n {:?}",
                e
            );
            Err(ObjectStorageError::WriteFailure)
        }
    }
}

pub fn read_object(project_id: &str, file_id: &str) -> Result<Vec<u8>, ObjectStorageError> {
    match fs::read(object_path(project_id, file_id)) {
        Ok(bytes) => Ok(bytes),
        Err(e) => {
            log::error!(
                "Failed to read object body from storage! Nested exception is: \n {:?}",
                e
            );
            Err(ObjectStorageError::ReadFailure)
        }
    }
}

/// removes every passed object in one batch, returning the ids that could not
/// be removed. A body that is already gone does not count as a failure, since
/// a failed upload can leave metadata without a body
pub fn delete_objects(project_id: &str, file_ids: &[String]) -> Result<(), Vec<String>> {
    let mut failed = Vec::new();
    for file_id in file_ids.iter() {
        match fs::remove_file(object_path(project_id, file_id)) {
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                log::error!(
                    "Failed to delete object body {file_id}! Nested exception is: \n {:?}",
                    e
                );
                failed.push(file_id.clone());
            }
        }
    }
    if failed.is_empty() {
        Ok(())
    } else {
        Err(failed)
    }
}

/// test-only check used by cascade-delete assertions
#[cfg(test)]
pub fn object_exists(project_id: &str, file_id: &str) -> bool {
    object_path(project_id, file_id).exists()
}

/// test-only seeding of an object body without going through an upload
#[cfg(test)]
pub fn write_object_direct(project_id: &str, file_id: &str, contents: &str) {
    let project_dir = Path::new(storage_root().as_str()).join(project_id);
    fs::create_dir_all(&project_dir).unwrap();
    fs::write(object_path(project_id, file_id), contents).unwrap();
}
