use std::{
    io,
    path::{Path, PathBuf},
};

use http::StatusCode;
use lissan_config::{AssetsConfig, is_bare_file_name};
use lissan_core::HttpError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("invalid asset name '{0}'")]
    InvalidName(String),

    #[error("asset name '{0}' is not in the allowed list")]
    NotAllowed(String),

    #[error("asset name is required")]
    MissingName,

    #[error("no file was uploaded")]
    MissingFile,

    #[error("failed to store asset '{name}': {source}")]
    Filesystem {
        name: String,
        #[source]
        source: io::Error,
    },
}

impl HttpError for AssetError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidName(_) | Self::NotAllowed(_) | Self::MissingName | Self::MissingFile => StatusCode::BAD_REQUEST,
            Self::Filesystem { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::InvalidName(_) | Self::NotAllowed(_) | Self::MissingName | Self::MissingFile => "invalid_request_error",
            Self::Filesystem { .. } => "filesystem_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Filesystem { name, .. } => format!("failed to store asset '{name}'"),
            _ => self.to_string(),
        }
    }
}

/// Directory of named audio files that uploads replace in place
#[derive(Debug, Clone)]
pub struct AssetStore {
    directory: PathBuf,
    allowed_names: Vec<String>,
}

impl AssetStore {
    pub fn new(config: &AssetsConfig) -> Self {
        Self {
            directory: config.directory.clone(),
            allowed_names: config.allowed_names.clone(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Resolve `name` to a path inside the asset directory
    ///
    /// Only bare file names pass, and when an allow-list is configured the
    /// name must be on it.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, AssetError> {
        if !is_bare_file_name(name) {
            return Err(AssetError::InvalidName(name.to_string()));
        }

        if !self.allowed_names.is_empty() && !self.allowed_names.iter().any(|allowed| allowed == name) {
            return Err(AssetError::NotAllowed(name.to_string()));
        }

        Ok(self.directory.join(name))
    }

    /// Replace the asset called `name` with `contents`
    pub async fn replace(&self, name: &str, contents: &[u8]) -> Result<PathBuf, AssetError> {
        let path = self.resolve(name)?;
        let fs_error = |source| AssetError::Filesystem {
            name: name.to_string(),
            source,
        };

        tokio::fs::create_dir_all(&self.directory).await.map_err(fs_error)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => tracing::debug!(path = %path.display(), "removed previous asset"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(fs_error(e)),
        }

        tokio::fs::write(&path, contents).await.map_err(fs_error)?;

        tracing::info!(path = %path.display(), bytes = contents.len(), "asset replaced");

        Ok(path)
    }
}
