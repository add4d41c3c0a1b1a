use std::path::PathBuf;

use serde::Deserialize;

/// Replaceable audio assets served to the front-end
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetsConfig {
    /// Directory uploads are written to and assets are served from
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    /// File names `/changeAudio` may write. Empty allows any safe file name.
    #[serde(default)]
    pub allowed_names: Vec<String>,
    /// Upload size limit in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    /// URL prefix the asset directory is served under
    #[serde(default = "default_serve_path")]
    pub serve_path: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            allowed_names: Vec::new(),
            max_upload_bytes: default_max_upload_bytes(),
            serve_path: default_serve_path(),
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from("public/audio")
}

#[allow(clippy::missing_const_for_fn)]
fn default_max_upload_bytes() -> usize {
    32 << 20
}

fn default_serve_path() -> String {
    "/assets".to_string()
}
