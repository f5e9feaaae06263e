#[derive(PartialEq, Debug)]
pub enum CreateUserError {
    /// a user with that username already exists
    AlreadyExists,
    /// the username or password is empty, or the role is not a known value
    InvalidRequest,
    DbFailure,
}
