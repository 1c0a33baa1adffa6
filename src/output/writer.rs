//! Destinations for generated files

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

/// Trait for writing generated text
pub trait FileWriter {
    /// Called once with the number of files about to be written
    fn begin(&mut self, _file_count: usize) -> Result<()> {
        Ok(())
    }

    fn write_text(&mut self, path: &Path, text: &str) -> Result<()>;
}

/// Writes files below a root directory, creating parent directories
pub struct DirectoryWriter {
    root: PathBuf,
}

impl DirectoryWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FileWriter for DirectoryWriter {
    fn write_text(&mut self, path: &Path, text: &str) -> Result<()> {
        let target = self.root.join(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(&target, text)
            .with_context(|| format!("Failed to write file: {}", target.display()))?;
        info!("Wrote {}", target.display());
        Ok(())
    }
}

/// Prints files to a stream, with a header per file when there is more than one
pub struct StdoutWriter<W: Write> {
    out: W,
    headers: bool,
    written: usize,
}

impl StdoutWriter<std::io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(std::io::stdout())
    }
}

impl Default for StdoutWriter<std::io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> StdoutWriter<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            headers: false,
            written: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FileWriter for StdoutWriter<W> {
    fn begin(&mut self, file_count: usize) -> Result<()> {
        self.headers = file_count > 1;
        Ok(())
    }

    fn write_text(&mut self, path: &Path, text: &str) -> Result<()> {
        if self.written > 0 {
            writeln!(self.out)?;
        }
        if self.headers {
            writeln!(self.out, "==> {} <==", path.display())?;
        }
        self.out.write_all(text.as_bytes())?;
        self.written += 1;
        Ok(())
    }
}
