use super::TokenStore;
use std::collections::BTreeMap;
use std::env;
use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use ulid::Ulid;

const FILE_NAME: &str = "storage.json";

/// Durable store backed by a JSON object on disk. Survives process restarts.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$XDG_STATE_HOME/lmsauth/storage.json`, falling back to
    /// `$HOME/.local/state/lmsauth/storage.json`, then the working directory.
    #[must_use]
    pub fn default_path() -> PathBuf {
        let base = env::var_os("XDG_STATE_HOME")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| {
                env::var_os("HOME")
                    .filter(|v| !v.is_empty())
                    .map(|home| PathBuf::from(home).join(".local").join("state"))
            });

        match base {
            Some(base) => base.join(env!("CARGO_PKG_NAME")).join(FILE_NAME),
            None => PathBuf::from(format!(".{}-{FILE_NAME}", env!("CARGO_PKG_NAME"))),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> io::Result<BTreeMap<String, String>> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(io::Error::from),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e),
        }
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension(format!("{}.tmp", Ulid::new()));

        write_atomic(&tmp, &self.path, &serde_json::to_vec_pretty(entries)?)
    }
}

// Write to a sibling file and rename so readers never see a partial object.
// The sibling is created owner-only and removed on every failure, unless it
// already existed and so was never ours.
fn write_atomic(tmp: &Path, target: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Err(e) = write_private(tmp, bytes) {
        if e.kind() != ErrorKind::AlreadyExists {
            let _ = fs::remove_file(tmp);
        }
        return Err(e);
    }

    fs::rename(tmp, target).inspect_err(|_| {
        let _ = fs::remove_file(tmp);
    })
}

fn write_private(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

impl TokenStore for FileStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    #[instrument(skip(self, value), fields(path = %self.path.display()))]
    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)?;

        debug!("stored entry");

        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn clear(&self, key: &str) -> io::Result<()> {
        let mut entries = self.load()?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.persist(&entries)?;

        debug!("cleared entry");

        Ok(())
    }
}
