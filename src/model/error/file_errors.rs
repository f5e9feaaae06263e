#[derive(PartialEq, Debug)]
pub enum ListFolderError {
    /// the requested folder is not present in the set visible to the caller
    FolderNotFound,
    /// the file set could not be read
    DbFailure,
}

#[derive(PartialEq, Debug)]
pub enum GetEntryError {
    NotFound,
    DbFailure,
}

#[derive(PartialEq, Debug)]
pub enum DownloadEntryError {
    NotFound,
    /// URL entries have no stored body to download
    NotDownloadable,
    DbFailure,
    /// the object storage read failed
    StorageFailure,
}

#[derive(PartialEq, Debug)]
pub enum AddEntryError {
    /// the entry name is empty or unsafe
    InvalidName,
    /// the requested access level is not one of the explicit values
    InvalidLevel,
    /// the requested parent folder does not exist
    ParentNotFound,
    /// the requested parent exists but is a file; files cannot contain children
    ParentNotFolder,
    DbFailure,
    /// the object storage write failed after the metadata write succeeded
    StorageFailure,
}

#[derive(PartialEq, Debug)]
pub enum RenameEntryError {
    NotFound,
    /// the new name is empty or unsafe
    InvalidName,
    DbFailure,
}

#[derive(PartialEq, Debug)]
pub enum MoveEntryError {
    NotFound,
    /// the destination folder does not exist
    ParentNotFound,
    /// the user attempted an illegal move, such as moving an entry into itself,
    /// into a file, or into one of its own descendants
    NotAllowed,
    DbFailure,
}

#[derive(PartialEq, Debug)]
pub enum SetAccessError {
    NotFound,
    /// `mixed` is derived and can never be set directly
    InvalidLevel,
    DbFailure,
}

#[derive(PartialEq, Debug)]
pub enum DeleteEntryError {
    NotFound,
    DbFailure,
    /// the batch object-storage delete reported errors; the metadata set was left untouched
    StorageFailure,
}
