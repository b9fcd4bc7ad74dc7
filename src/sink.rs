//! Consumers of the per-generation fitness log.
//!
//! The engine never touches the filesystem itself; it hands the finished
//! log to a [`FitnessSink`]. [`CsvSink`] writes it as `index,fitness`
//! lines to a timestamped file.

use chrono::Local;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Receives the ordered best-fitness values of a run, one per
/// generation.
pub trait FitnessSink {
    fn record(&mut self, fitness_log: &[f64]) -> io::Result<()>;
}

/// Writes the fitness log to `<dir>/<yyyyMMdd-HHmmss>.csv`.
///
/// The directory is created when missing.
#[derive(Debug, Clone)]
pub struct CsvSink {
    dir: PathBuf,
    last_path: Option<PathBuf>,
}

impl CsvSink {
    pub const DEFAULT_DIR: &'static str = "log";

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            last_path: None,
        }
    }

    /// Sink writing under `./log/`.
    pub fn in_current_dir() -> io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?.join(Self::DEFAULT_DIR)))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the most recently written file.
    pub fn last_path(&self) -> Option<&Path> {
        self.last_path.as_deref()
    }
}

impl FitnessSink for CsvSink {
    fn record(&mut self, fitness_log: &[f64]) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let file_name = format!("{}.csv", Local::now().format("%Y%m%d-%H%M%S"));
        let path = self.dir.join(file_name);

        let mut out = BufWriter::new(File::create(&path)?);
        write_csv(&mut out, fitness_log)?;
        out.flush()?;

        log::debug!(
            "wrote {} fitness values to {}",
            fitness_log.len(),
            path.display()
        );
        self.last_path = Some(path);
        Ok(())
    }
}

/// One `index,fitness` line per generation.
fn write_csv<W: Write>(out: &mut W, fitness_log: &[f64]) -> io::Result<()> {
    for (generation, fitness) in fitness_log.iter().enumerate() {
        writeln!(out, "{},{:?}", generation, fitness)?;
    }
    Ok(())
}
