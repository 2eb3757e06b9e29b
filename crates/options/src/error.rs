use std::{io, path::PathBuf};

use thiserror::Error;

/// A failure that stops the launcher before any process is started.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("couldn't create config folder at {path:?}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("couldn't write {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("couldn't read {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("couldn't parse {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseFailure,
    },

    #[error("{path:?} contains invalid or missing fields: {}", fields.join(", "))]
    Validation {
        path: PathBuf,
        fields: Vec<&'static str>,
    },
}

#[derive(Debug, Error)]
pub enum ParseFailure {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("the document is null")]
    Null,
}

impl OptionsError {
    /// Process exit status to report for this failure.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
