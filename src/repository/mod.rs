use std::path::Path;

#[cfg(not(test))]
use rusqlite::OpenFlags;
use rusqlite::{Connection, Result};

pub mod file_set_repository;
pub mod project_repository;

/// creates a new connection and returns it, but panics if the connection could not be created
#[cfg(not(test))]
pub fn open_connection() -> Connection {
    use crate::config::CONDUCTOR_CONFIG;

    match Connection::open_with_flags(
        Path::new(CONDUCTOR_CONFIG.clone().database.location.as_str()),
        OpenFlags::default(),
    ) {
        Ok(con) => con,
        Err(error) => panic!("Failed to get a connection to the database!: {error}"),
    }
}

#[cfg(test)]
pub fn open_connection() -> Connection {
    let db_name = format!("{}.sqlite", crate::test::current_thread_name());
    match Connection::open_with_flags(Path::new(db_name.as_str()), rusqlite::OpenFlags::default()) {
        Ok(con) => con,
        Err(error) => panic!("Failed to get a connection to the database!: {error}"),
    }
}

/// runs init.sql on the database
fn create_db(con: &mut Connection) {
    let sql = include_str!("../assets/init.sql");
    con.execute_batch(sql).unwrap();
}

/// handles checking if the database exists at the configured location,
/// creating it if it does not
pub fn initialize_db() -> Result<()> {
    let mut con = open_connection();
    // the version will be used once there is more than one version of the schema
    if get_schema_version(&con).is_err() {
        // tables haven't been created yet
        create_db(&mut con);
    }
    con.close().unwrap();
    Ok(())
}

fn get_schema_version(con: &Connection) -> Result<String> {
    con.query_row("select value from metadata where key = 'version'", [], |row| {
        row.get(0)
    })
}
