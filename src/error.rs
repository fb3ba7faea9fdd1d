//! Error taxonomy for one render invocation.

use crate::config::DataFormat;
use std::{io, path::PathBuf};
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// Bad, missing or conflicting arguments. Raised before any I/O.
    #[error("{0}")]
    Validation(String),

    #[error("read {role} file {}", path.display())]
    Read {
        role: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("create output directory {}", path.display())]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("open output file {}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("decode {format} data")]
    Decode {
        format: DataFormat,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Template compilation (`parse`) or execution (`execute`) failed.
    #[error("render template ({stage})")]
    Render {
        stage: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("write rendered output")]
    Write(#[source] io::Error),

    #[error("publish output file {}", path.display())]
    Commit {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Process exit status for this failure. Every kind is terminal.
    pub fn exit_code(&self) -> u8 {
        1
    }
}
