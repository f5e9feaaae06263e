use rusqlite::{params, Connection};

use crate::model::repository::{PlatformRole, Project, ProjectRole, UserRecord};

pub fn get_project(project_id: &str, con: &Connection) -> Result<Project, rusqlite::Error> {
    let mut pst = con
        .prepare(include_str!("../assets/queries/project/get_project.sql"))
        .unwrap();
    pst.query_row([project_id], |row| {
        Ok(Project {
            project_id: row.get(0)?,
            title: row.get(1)?,
        })
    })
}

pub fn create_project(project: &Project, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con
        .prepare(include_str!("../assets/queries/project/create_project.sql"))
        .unwrap();
    pst.execute(params![project.project_id, project.title])?;
    Ok(())
}

/// returns the caller's role within the project, or `None` if they are not a member
pub fn get_member_role(
    project_id: &str,
    username: &str,
    con: &Connection,
) -> Result<Option<ProjectRole>, rusqlite::Error> {
    let mut pst = con
        .prepare(include_str!(
            "../assets/queries/project/get_member_role.sql"
        ))
        .unwrap();
    let role = pst.query_row(params![project_id, username], |row| {
        row.get::<_, String>(0)
    });
    match role {
        Ok(value) => Ok(ProjectRole::parse(value.as_str())),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

pub fn add_member(
    project_id: &str,
    username: &str,
    role: ProjectRole,
    con: &Connection,
) -> Result<(), rusqlite::Error> {
    let mut pst = con
        .prepare(include_str!("../assets/queries/project/add_member.sql"))
        .unwrap();
    pst.execute(params![project_id, username, role.as_str()])?;
    Ok(())
}

pub fn get_user(username: &str, con: &Connection) -> Result<UserRecord, rusqlite::Error> {
    let mut pst = con
        .prepare(include_str!("../assets/queries/user/get_user.sql"))
        .unwrap();
    pst.query_row([username], |row| {
        let role: String = row.get(2)?;
        Ok(UserRecord {
            username: row.get(0)?,
            password_digest: row.get(1)?,
            // an unknown role value means someone edited the table by hand; treat it as the lowest role
            role: PlatformRole::parse(role.as_str()).unwrap_or(PlatformRole::User),
        })
    })
}

pub fn count_users(con: &Connection) -> Result<u64, rusqlite::Error> {
    let mut pst = con
        .prepare(include_str!("../assets/queries/user/count_users.sql"))
        .unwrap();
    pst.query_row([], |row| row.get(0))
}

pub fn create_user(user: &UserRecord, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con
        .prepare(include_str!("../assets/queries/user/create_user.sql"))
        .unwrap();
    pst.execute(params![
        user.username,
        user.password_digest,
        user.role.as_str()
    ])?;
    Ok(())
}
