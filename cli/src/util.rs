use anyhow::{Error, Result};
use colored::Colorize;
use scaffold_core::config::Config;
use std::path::Path;
use std::process::Command;
use tracing::debug;

pub trait CommandSuccess {
    fn ok_or(&mut self, message: &str) -> Result<(), anyhow::Error>;
}

impl CommandSuccess for Command {
    fn ok_or(&mut self, message: &str) -> Result<(), anyhow::Error> {
        let status = self.status()?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::msg(message.to_string()))
        }
    }
}

/// Runs the configured autoload refresh (`composer dump-autoload` by default) in `base`.
pub fn dump_autoloads(config: &Config, base: &Path) -> Result<()> {
    let (program, args) = config.autoload_program()?;
    eprintln!("{}", "Dumping autoload".green());
    debug!(program, ?args, base = %base.display(), "running autoload command");
    Command::new(program)
        .args(args)
        .current_dir(base)
        .ok_or(&format!("`{}` failed", config.autoload_command.join(" ")))
}
