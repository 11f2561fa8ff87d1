use crate::probe;

/// Why a single request did not get a `200 OK`. None of these stop the server.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed request line")]
    BadRequest,
    #[error("no route for {0:?}")]
    NotFound(String),
    #[error(transparent)]
    SystemRead(#[from] probe::Error),
}
