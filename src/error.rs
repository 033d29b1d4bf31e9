use std::{error::Error as StdError, fmt, io, result::Result as StdResult};

/// Failures local to the tree document and its mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// A path did not resolve to a node.
    NotFound,
    /// A structurally illegal path, e.g. removing the root or indexing past
    /// the end of a sibling list during removal.
    InvalidPath,
    /// Input that is not tree-shaped (non-object node, non-array children).
    Malformed(String),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "path does not resolve to a node"),
            Self::InvalidPath => write!(f, "invalid path for this operation"),
            Self::Malformed(msg) => write!(f, "malformed tree input: {msg}"),
        }
    }
}

impl StdError for TreeError {}

#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Json(serde_json::Error),
    Tree(TreeError),
    /// The external content generator failed; propagated, never retried here.
    Generation(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {e}"),
            Self::Json(e) => write!(f, "JSON error: {e}"),
            Self::Tree(e) => write!(f, "Tree error: {e}"),
            Self::Generation(msg) => write!(f, "Generation error: {msg}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Tree(e) => Some(e),
            Self::Generation(_) => None,
        }
    }
}

impl From<TreeError> for Error {
    fn from(e: TreeError) -> Self {
        Self::Tree(e)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

pub type Result<T> = StdResult<T, Error>;
