//! Tagged arguments: `s:<literal>` or `f:<path>`.

use crate::error::{Error, Result};
use std::{fs, path::PathBuf};

/// A parsed `<kind>:<payload>` argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaggedSource {
    /// `s:`, the payload is the content.
    Inline(String),
    /// `f:`, the payload names a file holding the content.
    File(PathBuf),
    /// Any other kind tag. Resolves to empty content.
    Unrecognized(String),
}

impl TaggedSource {
    /// Split `arg` into its one-character kind and the payload after the
    /// separator. The separator character itself is not checked.
    pub fn parse(arg: &str) -> Self {
        let mut chars = arg.chars();
        let kind = chars.next();
        chars.next();
        let payload = chars.as_str();

        match kind {
            Some('s') => Self::Inline(payload.to_owned()),
            Some('f') => Self::File(PathBuf::from(payload)),
            other => Self::Unrecognized(other.map(String::from).unwrap_or_default()),
        }
    }

    /// Produce the raw text this argument refers to. `role` names the flag
    /// for diagnostics.
    pub fn resolve(&self, role: &'static str) -> Result<String> {
        match self {
            Self::Inline(content) => {
                log::debug!("{role:>20} : string");
                log::debug!("{:>20} : \n{content}", format!("{role} content"));
                Ok(content.clone())
            }
            Self::File(path) => {
                log::debug!("{role:>20} : file {}", path.display());
                let content = fs::read_to_string(path).map_err(|source| Error::Read {
                    role,
                    path: path.clone(),
                    source,
                })?;
                log::debug!("{:>20} : \n{content}", format!("{role} content"));
                Ok(content)
            }
            // Legacy behaviour: an unknown kind is not an error.
            Self::Unrecognized(kind) => {
                log::warn!("{role}: unrecognized source kind {kind:?}, expected `s:` or `f:`; using empty content");
                Ok(String::new())
            }
        }
    }
}
