use rocket::fs::TempFile;
use rocket::FromForm;

#[derive(FromForm)]
pub struct FileUpload<'a> {
    pub file: TempFile<'a>,
    /// display name for the entry, extension included
    pub name: String,
    /// `file_id` of the containing folder; absent or empty for the project root
    pub parent: Option<String>,
    /// one of the explicit access levels; defaults to `team`
    pub access: Option<String>,
}
