//! Logs module — brewing log listing, parsing, deletion and download.

pub mod chart;
pub mod error;
pub mod filename;
pub mod record;
pub mod route;
pub mod service;

pub use chart::{ChartKind, ChartSeries};
pub use error::LogError;
pub use service::{LogDownload, LogService};
