use crate::config::STORAGE_KEY;
use crate::domain::model::ProfileDraft;
use crate::domain::ports::DraftStore;
use crate::utils::error::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// One JSON document under the fixed storage key. Corrupt contents count as
/// no draft.
#[derive(Debug, Clone)]
pub struct FileDraftStore {
    base_path: PathBuf,
}

impl FileDraftStore {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn file_path(&self) -> PathBuf {
        self.base_path.join(format!("{}.json", STORAGE_KEY))
    }
}

impl DraftStore for FileDraftStore {
    fn save(&self, draft: &ProfileDraft) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;
        let data = serde_json::to_vec(draft)?;
        fs::write(self.file_path(), data)?;
        Ok(())
    }

    fn load(&self) -> Result<Option<ProfileDraft>> {
        let raw = match fs::read_to_string(self.file_path()) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&raw) {
            Ok(draft) => Ok(Some(draft)),
            Err(e) => {
                tracing::warn!("Ignoring corrupt saved form data: {}", e);
                Ok(None)
            }
        }
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(self.file_path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
