//! Rendered output fanned out to the console and an optional file.
//!
//! The file is staged as a temp file next to its destination and renamed
//! into place by [`Sinks::finish`]. Dropping the sinks without finishing
//! removes the staged file, so a failed render never leaves a partial
//! output file behind. An existing destination is written through: a
//! symlink's target is replaced and the file keeps its permissions.
use crate::{
    error::{Error, Result},
    util,
};
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};
use tempfile::{Builder, NamedTempFile};

pub struct Sinks<W: Write> {
    file: Option<Staged>,
    console: W,
}

struct Staged {
    temp: NamedTempFile,
    dest: PathBuf,
}

impl<W: Write> Sinks<W> {
    /// Open the console sink plus, when `out` is given, a staged file for
    /// `out`. Missing parent directories are created.
    pub fn open(out: Option<&Path>, console: W) -> Result<Self> {
        let file = out.map(Staged::create).transpose()?;
        Ok(Self { file, console })
    }

    /// Flush both sinks and publish the staged file at its destination.
    pub fn finish(mut self) -> Result<()> {
        self.flush().map_err(Error::Write)?;
        match self.file {
            Some(staged) => staged.commit(),
            None => Ok(()),
        }
    }
}

/// Every write goes to the file first, then the console. A failure on
/// either one fails the whole write.
impl<W: Write> Write for Sinks<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(staged) = &mut self.file {
            staged.temp.write_all(buf)?;
        }
        self.console.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(staged) = &mut self.file {
            staged.temp.flush()?;
        }
        self.console.flush()
    }
}

impl Staged {
    fn create(dest: &Path) -> Result<Self> {
        if dest.is_dir() {
            return Err(Error::FileOpen {
                path: dest.to_path_buf(),
                source: io::Error::other("path is a directory"),
            });
        }

        let open_error = |source| Error::FileOpen {
            path: dest.to_path_buf(),
            source,
        };

        // Stage next to the real file so the rename replaces it, not a
        // symlink pointing at it.
        let existing = match fs::metadata(dest) {
            Ok(meta) => Some(meta.permissions()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(open_error(e)),
        };
        let target = match existing {
            Some(_) => fs::canonicalize(dest).map_err(open_error)?,
            None => dest.to_path_buf(),
        };

        let dir = util::parent_dir(&target);
        fs::create_dir_all(dir).map_err(|source| Error::DirectoryCreate {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut builder = Builder::new();
        builder.prefix(".gotmpl.").suffix(".tmp");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
        let temp = builder.tempfile_in(dir).map_err(open_error)?;

        if let Some(perms) = existing {
            temp.as_file().set_permissions(perms).map_err(open_error)?;
        }

        log::debug!("{:>20} : {}", "out file path", target.display());
        log::debug!("{:>20} : {}", "staged at", temp.path().display());

        Ok(Self { temp, dest: target })
    }

    /// Atomically move the staged file onto `dest`.
    fn commit(self) -> Result<()> {
        self.temp.persist(&self.dest).map_err(|e| Error::Commit {
            path: self.dest.clone(),
            source: e.error,
        })?;
        Ok(())
    }
}
