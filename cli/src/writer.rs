use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::{BufRead, Write};
use std::path::Path;

pub trait FileWriter {
    /// Writes `contents` to `path`. Returns `false` when the file already existed and the
    /// overwrite was declined, in which case the file is left untouched.
    fn write_if_confirmed(&mut self, path: &Path, contents: &str) -> Result<bool>;

    fn append(&mut self, path: &Path, contents: &str) -> Result<()>;
}

/// Asks on `prompt` before replacing an existing file and reads the answer from `input`.
pub struct ConfirmingWriter<R, W> {
    input: R,
    prompt: W,
    force: bool,
}

impl<R: BufRead, W: Write> ConfirmingWriter<R, W> {
    pub fn new(input: R, prompt: W, force: bool) -> Self {
        Self { input, prompt, force }
    }

    fn confirm_overwrite(&mut self, path: &Path) -> Result<bool> {
        write!(
            self.prompt,
            "File {} already exists. Should I override this file? (Y/N) ",
            path.display()
        )?;
        self.prompt.flush()?;
        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Ok(false);
        }
        let answer = answer.trim().to_ascii_lowercase();
        Ok(answer == "y" || answer == "yes")
    }
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("Unable to create directory {}", parent.display()))?;
    }
    Ok(())
}

impl<R: BufRead, W: Write> FileWriter for ConfirmingWriter<R, W> {
    fn write_if_confirmed(&mut self, path: &Path, contents: &str) -> Result<bool> {
        if path.exists() && !self.force && !self.confirm_overwrite(path)? {
            return Ok(false);
        }
        create_parent(path)?;
        fs::write(path, contents).with_context(|| format!("Could not write to {}", path.display()))?;
        Ok(true)
    }

    fn append(&mut self, path: &Path, contents: &str) -> Result<()> {
        create_parent(path)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        file.write_all(contents.as_bytes())
            .with_context(|| format!("Could not append to {}", path.display()))?;
        Ok(())
    }
}
