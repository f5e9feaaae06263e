use rocket::serde::json::serde_json;
use rusqlite::{params, Connection, Row};

use crate::model::repository::{AccessLevel, FileEntry, StorageType};

/// pulls the entire flat file set for one project. Ordering is not meaningful
/// here; siblings are sorted during tree reconstruction
pub fn load_file_set(project_id: &str, con: &Connection) -> Result<Vec<FileEntry>, rusqlite::Error> {
    let mut pst = con
        .prepare(include_str!("../assets/queries/file_set/load_file_set.sql"))
        .unwrap();
    let mut entries = Vec::<FileEntry>::new();
    let mut rows = pst.query([project_id])?;
    while let Some(row) = rows.next()? {
        entries.push(map_entry(project_id, row)?);
    }
    Ok(entries)
}

/// replaces the entire flat file set for one project in a single transaction.
/// This is deliberately a whole-set rewrite: concurrent writers race with
/// last-write-wins semantics, the same contract the rest of the application is
/// built around
pub fn save_file_set(
    project_id: &str,
    entries: &[FileEntry],
    con: &mut Connection,
) -> Result<(), rusqlite::Error> {
    let tx = con.transaction()?;
    {
        tx.execute(
            include_str!("../assets/queries/file_set/delete_file_set.sql"),
            params![project_id],
        )?;
        let mut pst = tx
            .prepare(include_str!(
                "../assets/queries/file_set/insert_file_entry.sql"
            ))
            .unwrap();
        for entry in entries.iter() {
            let authors = serde_json::to_string(&entry.authors).unwrap();
            pst.execute(params![
                project_id,
                entry.file_id,
                entry.name,
                entry.storage_type.as_str(),
                entry.parent,
                entry.access.as_str(),
                entry.size,
                entry.is_url,
                entry.url,
                entry.license,
                authors,
                entry.publisher,
                entry.description,
                entry.mime_type,
                entry.version,
                entry.download_count,
                entry.created_by,
                entry.created_at,
            ])?;
        }
    }
    tx.commit()
}

fn map_entry(project_id: &str, row: &Row) -> Result<FileEntry, rusqlite::Error> {
    let storage_type: String = row.get(2)?;
    let access: String = row.get(4)?;
    let authors: String = row.get(9)?;
    Ok(FileEntry {
        project_id: project_id.to_string(),
        file_id: row.get(0)?,
        name: row.get(1)?,
        // these columns can only hold values this application wrote, so a bad
        // value is a corrupt database and fails the whole read
        storage_type: StorageType::parse(storage_type.as_str()).ok_or(
            rusqlite::Error::InvalidColumnType(2, storage_type, rusqlite::types::Type::Text),
        )?,
        parent: row.get(3)?,
        access: AccessLevel::parse(access.as_str()).ok_or(rusqlite::Error::InvalidColumnType(
            4,
            access,
            rusqlite::types::Type::Text,
        ))?,
        size: row.get(5)?,
        is_url: row.get(6)?,
        url: row.get(7)?,
        license: row.get(8)?,
        authors: serde_json::from_str(authors.as_str()).unwrap_or_default(),
        publisher: row.get(10)?,
        description: row.get(11)?,
        mime_type: row.get(12)?,
        version: row.get(13)?,
        download_count: row.get(14)?,
        created_by: row.get(15)?,
        created_at: row.get(16)?,
    })
}
