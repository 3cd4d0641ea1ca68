use anyhow::{Context, Result};
use scaffold_core::config::{Config, CONFIG_REL_PATHS};
use std::fs;
use std::path::{Path, PathBuf};

pub fn load_config() -> Result<Config> {
    let mut search_paths = vec![PathBuf::from("."), PathBuf::from("..")];
    search_paths.extend(dirs::config_dir());
    search_paths.extend(dirs::home_dir());
    for p in &search_paths {
        for rel_path in &CONFIG_REL_PATHS {
            let path = p.join(rel_path);
            if path.exists() {
                return read(&path);
            }
        }
    }
    Ok(Config::default())
}

pub fn read(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    let buf = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let config: Config = toml::from_str(&buf).with_context(|| format!("Invalid config file {}", path.display()))?;
    Ok(config)
}
