//! Log Sinks
//!
//! Append-only, per-category destinations for rendered lines. The emission
//! loop is the only writer, so ordering within a category follows call order.

use async_trait::async_trait;
use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::core::Category;
use crate::error::{SimError, SimResult};

#[async_trait]
pub trait LogSink: Send {
    /// Append `line` plus a newline and flush it before returning
    async fn append(&mut self, category: Category, line: &str) -> SimResult<()>;
}

// ============================================================================
// FileSink
// ============================================================================

/// How file names are derived over time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    /// `<category>.log`, forever
    #[default]
    Never,
    /// `<category>_<YYYYmmddHH>.log`, a new file each hour
    Hourly,
}

impl Rotation {
    /// File name for lines of `category` written at `now`
    pub fn file_name(&self, category: Category, now: DateTime<Local>) -> String {
        match self {
            Rotation::Never => format!("{category}.log"),
            Rotation::Hourly => format!("{category}_{}.log", now.format("%Y%m%d%H")),
        }
    }
}

impl FromStr for Rotation {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "never" | "none" => Ok(Rotation::Never),
            "hourly" => Ok(Rotation::Hourly),
            other => Err(SimError::config(format!("unknown rotation policy: {other}"))),
        }
    }
}

struct OpenLog {
    path: PathBuf,
    file: File,
}

/// One file per category under `dir`, created on first write
pub struct FileSink {
    dir: PathBuf,
    rotation: Rotation,
    open: HashMap<Category, OpenLog>,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>, rotation: Rotation) -> Self {
        Self {
            dir: dir.into(),
            rotation,
            open: HashMap::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a line for `category` written at `now` goes to
    pub fn path_at(&self, category: Category, now: DateTime<Local>) -> PathBuf {
        self.dir.join(self.rotation.file_name(category, now))
    }

    /// Path the next line for `category` goes to
    pub fn current_path(&self, category: Category) -> PathBuf {
        self.path_at(category, Local::now())
    }

    /// Append as if the wall clock read `now`; picks the rotated file
    pub async fn append_at(
        &mut self,
        category: Category,
        line: &str,
        now: DateTime<Local>,
    ) -> SimResult<()> {
        let log = self.handle(category, now).await?;
        if let Err(source) = Self::write_line(log, line).await {
            let path = log.path.clone();
            // Drop the handle so the next append reopens it
            self.open.remove(&category);
            return Err(SimError::SinkWrite {
                category,
                path,
                source,
            });
        }
        Ok(())
    }

    async fn handle(
        &mut self,
        category: Category,
        now: DateTime<Local>,
    ) -> SimResult<&mut OpenLog> {
        let path = self.path_at(category, now);
        if self.open.get(&category).is_some_and(|log| log.path != path) {
            if let Some(old) = self.open.remove(&category) {
                info!(
                    %category,
                    from = %old.path.display(),
                    to = %path.display(),
                    "rotating log file"
                );
            }
        }

        match self.open.entry(category) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let sink_err = |source| SimError::SinkWrite {
                    category,
                    path: path.clone(),
                    source,
                };
                fs::create_dir_all(&self.dir).await.map_err(sink_err)?;
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&path)
                    .await
                    .map_err(sink_err)?;
                debug!(%category, path = %path.display(), "opened log file");
                Ok(entry.insert(OpenLog { path, file }))
            }
        }
    }

    async fn write_line(log: &mut OpenLog, line: &str) -> std::io::Result<()> {
        let mut buf = Vec::with_capacity(line.len() + 1);
        buf.extend_from_slice(line.as_bytes());
        buf.push(b'\n');
        log.file.write_all(&buf).await?;
        log.file.flush().await?;
        log.file.sync_data().await
    }
}

#[async_trait]
impl LogSink for FileSink {
    async fn append(&mut self, category: Category, line: &str) -> SimResult<()> {
        self.append_at(category, line, Local::now()).await
    }
}

// ============================================================================
// MemorySink
// ============================================================================

/// In-memory sink; clones share the same buffers
#[derive(Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<HashMap<Category, Vec<String>>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self, category: Category) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&category)
            .cloned()
            .unwrap_or_default()
    }

    pub fn count(&self, category: Category) -> usize {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&category)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl LogSink for MemorySink {
    async fn append(&mut self, category: Category, line: &str) -> SimResult<()> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(category)
            .or_default()
            .push(line.to_string());
        Ok(())
    }
}
