//! Error types for the extraction pipeline

/// Failure reading raw file content
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Path escapes the content root: {0}")]
    OutsideRoot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a file could not be extracted
#[derive(Debug, thiserror::Error)]
pub enum Cause {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported entry type '{0}'")]
    UnsupportedEntry(String),

    #[error("Unhandled dynamic entry '{0}'")]
    UnhandledDynamic(String),

    #[error("Tag entry has neither 'tag' nor 'name'")]
    MissingTag,

    #[error("Loot table entry has neither 'value' nor 'name'")]
    MissingTableValue,

    #[error("Recipe is missing '{0}'")]
    MissingRecipeField(&'static str),

    #[error("Malformed ingredient: {0}")]
    MalformedIngredient(String),

    #[error("Could not read referenced table {path}: {source}")]
    Reference {
        path: String,
        #[source]
        source: ContentError,
    },

    #[error("Reference chain deeper than {0} tables")]
    ReferenceDepth(usize),

    #[error("Could not read file: {0}")]
    Read(#[source] ContentError),

    #[error("Extraction task failed: {0}")]
    Task(String),
}

/// An unrecoverable fault while extracting one file
///
/// Always attributed to the top-level file under extraction, even when the
/// fault comes from a table it references.
#[derive(Debug, thiserror::Error)]
#[error("{filename}: {cause}")]
pub struct FileError {
    pub filename: String,
    #[source]
    pub cause: Cause,
}

impl FileError {
    pub fn new(filename: impl Into<String>, cause: impl Into<Cause>) -> Self {
        Self {
            filename: filename.into(),
            cause: cause.into(),
        }
    }
}

/// Result type for per-file extraction
pub type Result<T> = std::result::Result<T, FileError>;

/// Failure reading or writing a sources manifest
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid manifest: {0}")]
    Json(#[from] serde_json::Error),
}
