use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, error, info};
use thiserror::Error;

use crate::types::Page;

/// Suffix appended to every title to form its file name.
const PAGE_SUFFIX: &str = ".txt";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("page {0:?} does not exist")]
    NotFound(String),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Flat, file-per-title page storage.
///
/// There is no cache: every `load` reads the file again, so a `save`
/// followed by a `load` of the same title always sees the new body.
/// Concurrent saves to one title are last-write-wins.
#[derive(Debug, Clone)]
pub struct PageStore {
    pages_dir: PathBuf,
}

impl PageStore {
    /// Open the store rooted at `pages_dir`, creating the directory if needed.
    pub fn open(pages_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let pages_dir = pages_dir.into();
        debug!("Opening PageStore at {:?}", pages_dir);
        fs::create_dir_all(&pages_dir).map_err(|source| StoreError::Io {
            path: pages_dir.clone(),
            source,
        })?;
        Ok(Self { pages_dir })
    }

    pub fn pages_dir(&self) -> &Path {
        &self.pages_dir
    }

    /// File backing `title`. Distinct titles map to distinct files as long as
    /// titles stay within the path validator's alphabet.
    pub fn path_for(&self, title: &str) -> PathBuf {
        self.pages_dir.join(format!("{title}{PAGE_SUFFIX}"))
    }

    /// Write `body` as the content of `title`, replacing what was there.
    /// The file is readable and writable by the owner only.
    pub fn save(&self, title: &str, body: &[u8]) -> Result<(), StoreError> {
        let path = self.path_for(title);
        debug!("Saving page {:?} to {:?}", title, path);

        write_owner_only(&path, body).map_err(|source| {
            error!("Failed to save page {:?}: {}", title, source);
            StoreError::Io { path: path.clone(), source }
        })?;

        info!("Saved page {:?}, {} bytes", title, body.len());
        Ok(())
    }

    /// Read the stored content of `title`.
    pub fn load(&self, title: &str) -> Result<Page, StoreError> {
        let path = self.path_for(title);
        debug!("Loading page {:?} from {:?}", title, path);

        match fs::read(&path) {
            Ok(body) => {
                info!("Loaded page {:?}, {} bytes", title, body.len());
                Ok(Page::new(title, body))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Page {:?} does not exist", title);
                Err(StoreError::NotFound(title.to_string()))
            }
            Err(source) => {
                error!("Failed to load page {:?}: {}", title, source);
                Err(StoreError::Io { path, source })
            }
        }
    }
}

#[cfg(unix)]
fn write_owner_only(path: &Path, body: &[u8]) -> io::Result<()> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // `mode` only applies on creation
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.write_all(body)
}

#[cfg(not(unix))]
fn write_owner_only(path: &Path, body: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    file.write_all(body)
}
