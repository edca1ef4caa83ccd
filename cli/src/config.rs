use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Paths of the two persisted records: the profile object and the log array.
pub struct Config {
    pub profile_path: PathBuf,
    pub logs_path: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        let proj_dirs =
            ProjectDirs::from("", "", "vitality").context("Could not determine home directory")?;

        let data_dir = proj_dirs.data_dir().to_path_buf();
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        Ok(Config {
            profile_path: data_dir.join("profile.json"),
            logs_path: data_dir.join("logs.json"),
        })
    }
}
