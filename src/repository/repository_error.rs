/// One failure kind per verb. Create and update failures share `Write`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RepositoryError {
    #[error("There was a problem retrieving all the results: {0}")]
    Query(String),

    #[error("There was a problem reading the resource: {0}")]
    Read(String),

    #[error("There was a problem writing the resource: {0}")]
    Write(String),

    #[error("There was a problem destroying the resource: {0}")]
    Destroy(String),
}
