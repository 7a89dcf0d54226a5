use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::verify::VerifyError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Verify(#[from] VerifyError),

    #[error("invalid benchmark configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read benchmark configuration {}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse benchmark configuration {}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write results to {}", .path.display())]
    WriteResults {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize results")]
    Export(#[from] serde_json::Error),
}
