//! Service — file-backed operations over the log directory.
//!
//! Every call opens, reads and closes its own file handle; nothing is cached
//! between requests. The brewing engine owns the directory and may append to
//! files at any time.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs::{self, File};
use tracing::{debug, info, warn};

use super::chart::{ChartKind, ChartSeries};
use super::error::{LogError, Result};
use super::filename::{is_valid_log_filename, series_filename};
use super::record::{self, ActionLogRecord, LogRecord};
use crate::brewery::{ControllerRegistry, EntityCache, EntityKind, NotificationKind, Notifier};

/// An opened log file ready to be streamed to a client.
#[derive(Debug)]
pub struct LogDownload {
    pub filename: String,
    pub file: File,
    pub len: u64,
}

/// Read/delete access to the brewing logs plus CSV → chart projection.
pub struct LogService {
    directory: PathBuf,
    action_log: String,
    entities: Arc<dyn EntityCache>,
    controllers: Arc<dyn ControllerRegistry>,
    notifier: Arc<dyn Notifier>,
}

impl LogService {
    pub fn new(
        directory: impl Into<PathBuf>,
        action_log: impl Into<String>,
        entities: Arc<dyn EntityCache>,
        controllers: Arc<dyn ControllerRegistry>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            directory: directory.into(),
            action_log: action_log.into(),
            entities,
            controllers,
            notifier,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Names of all regular files ending in `.log`, in directory order.
    pub async fn list_log_files(&self) -> Result<Vec<String>> {
        let mut entries = match fs::read_dir(&self.directory).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(directory = %self.directory.display(), "Log directory does not exist");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut result = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if !name.ends_with(".log") {
                continue;
            }
            // Follows symlinks, so a link to a log file is listed
            match fs::metadata(entry.path()).await {
                Ok(meta) if meta.is_file() => result.push(name),
                _ => {}
            }
        }

        debug!(count = result.len(), "Listed log files");
        Ok(result)
    }

    /// Parsed brewing actions in file order; empty when the action log is absent.
    pub async fn actions(&self) -> Result<Vec<ActionLogRecord>> {
        let Some(content) = self.read_optional(&self.action_log).await? else {
            return Ok(Vec::new());
        };

        let parsed = record::parse_actions(&content);
        if parsed.skipped > 0 {
            debug!(file = %self.action_log, skipped = parsed.skipped, "Skipped malformed action rows");
        }
        Ok(parsed.records)
    }

    /// Delete a log file by bare name.
    pub async fn delete_log(&self, filename: &str) -> Result<()> {
        let path = self.resolve(filename)?;

        let is_file = match fs::metadata(&path).await {
            Ok(meta) => meta.is_file(),
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => return Err(e.into()),
        };

        if is_file {
            match fs::remove_file(&path).await {
                Ok(()) => {
                    info!(file = filename, "Log deleted");
                    self.notifier
                        .notify("Log deleted successfully", "", NotificationKind::Success);
                    return Ok(());
                }
                // Removed by someone else between the check and the delete
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        warn!(file = filename, "Log to delete does not exist");
        self.notifier
            .notify("Failed to delete log", "", NotificationKind::Danger);
        Err(LogError::FileNotFound(filename.to_string()))
    }

    /// Open a log file for download.
    pub async fn open_log(&self, filename: &str) -> Result<LogDownload> {
        let path = self.resolve(filename)?;

        let file = match File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(LogError::FileNotFound(filename.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let meta = file.metadata().await?;
        if !meta.is_file() {
            return Err(LogError::FileNotFound(filename.to_string()));
        }

        Ok(LogDownload {
            filename: filename.to_string(),
            file,
            len: meta.len(),
        })
    }

    /// Chart data for a sensor, kettle or fermenter.
    ///
    /// Sensors chart their own log. Kettles and fermenters ask their
    /// controller which series make up the chart.
    pub async fn chart(&self, kind: ChartKind, id: u32) -> Result<Vec<ChartSeries>> {
        let entity_kind = kind.entity_kind();
        let entity = self
            .entities
            .get(entity_kind, id)
            .ok_or(LogError::EntityNotFound { kind: entity_kind, id })?;

        let Some(controller_kind) = kind.controller_kind() else {
            let data = self
                .read_log_as_json(EntityKind::Sensor.as_str(), &id.to_string())
                .await?;
            return Ok(vec![ChartSeries { name: entity.name, data }]);
        };

        let logic = entity
            .logic
            .as_deref()
            .ok_or(LogError::MissingLogic { kind: entity_kind, id })?;
        let controller = self
            .controllers
            .controller(controller_kind, logic)
            .ok_or_else(|| LogError::ControllerNotFound {
                kind: controller_kind,
                logic: logic.to_string(),
            })?;

        let mut result = Vec::new();
        for descriptor in controller.chart(&entity) {
            let data = self
                .read_log_as_json(&descriptor.data_type, &descriptor.data_id)
                .await?;
            result.push(ChartSeries {
                name: descriptor.name,
                data,
            });
        }
        Ok(result)
    }

    /// Parse `<data_type>_<data_id>.log` as a numeric series.
    ///
    /// A missing file, or a name that is not a plain log file name, yields
    /// an empty series.
    pub async fn read_log_as_json(&self, data_type: &str, data_id: &str) -> Result<Vec<LogRecord>> {
        let filename = series_filename(data_type, data_id);
        if !is_valid_log_filename(&filename) {
            warn!(file = %filename, "Refusing to read series with an invalid file name");
            return Ok(Vec::new());
        }

        let Some(content) = self.read_optional(&filename).await? else {
            return Ok(Vec::new());
        };

        let parsed = record::parse_series(&content);
        if parsed.skipped > 0 {
            debug!(file = %filename, skipped = parsed.skipped, "Skipped malformed series rows");
        }
        Ok(parsed.records)
    }

    /// Validate a bare file name and join it onto the log directory.
    fn resolve(&self, filename: &str) -> Result<PathBuf> {
        if !is_valid_log_filename(filename) {
            return Err(LogError::InvalidFilename(filename.to_string()));
        }
        Ok(self.directory.join(filename))
    }

    async fn read_optional(&self, filename: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(self.directory.join(filename)).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
