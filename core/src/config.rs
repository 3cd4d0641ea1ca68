use crate::{Error, Result};
use serde::Deserialize;
use std::env::var;
use std::path::PathBuf;

const BASE_PATH: &str = ".";
pub const CONFIG_REL_PATHS: [&str; 2] = [".scaffold/config.toml", ".scaffold.toml"];

/// Root of the project the artifacts are written into.
pub fn get_var_base_path() -> PathBuf {
    let folder = var("SCAFFOLD_BASE_PATH").unwrap_or_else(|_| BASE_PATH.to_string());
    PathBuf::from(folder)
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The project's base controller does not return the validated attributes,
    /// so generated controllers validate and collect attributes themselves.
    pub inline_validation: bool,
    /// The project's base controller has no `keysToSnakeCase` helper.
    pub inline_snake_case: bool,
    pub dump_autoload: bool,
    pub autoload_command: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inline_validation: true,
            inline_snake_case: true,
            dump_autoload: true,
            autoload_command: vec!["composer".to_string(), "dump-autoload".to_string()],
        }
    }
}

impl Config {
    pub fn autoload_program(&self) -> Result<(&str, &[String])> {
        match self.autoload_command.split_first() {
            Some((program, args)) if !program.trim().is_empty() => Ok((program.as_str(), args)),
            _ => Err(Error::Config("autoload_command must name a program".to_string())),
        }
    }
}
