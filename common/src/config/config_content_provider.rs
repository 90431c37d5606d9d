use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::error::{GameError, GameResult};

/// Raw storage behind a [`super::ConfigManager`]. `Ok(None)` means nothing has been stored yet.
pub trait ConfigContentProvider {
    fn get_config_content(&self) -> GameResult<Option<String>>;
    fn set_config_content(&self, content: &str) -> GameResult<()>;
}

pub struct FileContentConfigProvider {
    file_path: PathBuf,
}

impl FileContentConfigProvider {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }
}

impl ConfigContentProvider for FileContentConfigProvider {
    fn get_config_content(&self) -> GameResult<Option<String>> {
        match std::fs::read_to_string(&self.file_path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(GameError::Storage(format!(
                "Failed to read {}: {}",
                self.file_path.display(),
                err
            ))),
        }
    }

    fn set_config_content(&self, content: &str) -> GameResult<()> {
        if let Some(parent) = self.file_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                GameError::Storage(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
        std::fs::write(&self.file_path, content).map_err(|e| {
            GameError::Storage(format!("Failed to write {}: {}", self.file_path.display(), e))
        })
    }
}

/// In-process storage, shared between clones.
#[derive(Clone, Default)]
pub struct MemoryContentProvider {
    content: Arc<Mutex<Option<String>>>,
}

impl MemoryContentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(content: &str) -> Self {
        Self {
            content: Arc::new(Mutex::new(Some(content.to_string()))),
        }
    }

    pub fn content(&self) -> Option<String> {
        self.content.lock().ok().and_then(|c| c.clone())
    }
}

impl ConfigContentProvider for MemoryContentProvider {
    fn get_config_content(&self) -> GameResult<Option<String>> {
        self.content
            .lock()
            .map(|c| c.clone())
            .map_err(|_| GameError::Storage("memory store poisoned".to_string()))
    }

    fn set_config_content(&self, content: &str) -> GameResult<()> {
        let mut current = self
            .content
            .lock()
            .map_err(|_| GameError::Storage("memory store poisoned".to_string()))?;
        *current = Some(content.to_string());
        Ok(())
    }
}
