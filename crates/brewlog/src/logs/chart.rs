//! Chart — chart request kinds and the series returned to the client.

use serde::Serialize;
use std::str::FromStr;

use super::error::LogError;
use super::record::LogRecord;
use crate::brewery::{ControllerKind, EntityKind};

/// The `t` path segment of a chart request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Sensor,
    Kettle,
    Fermenter,
}

impl ChartKind {
    pub fn entity_kind(&self) -> EntityKind {
        match self {
            ChartKind::Sensor => EntityKind::Sensor,
            ChartKind::Kettle => EntityKind::Kettle,
            ChartKind::Fermenter => EntityKind::Fermenter,
        }
    }

    /// Registry that charts this kind, if it is controller-driven.
    pub fn controller_kind(&self) -> Option<ControllerKind> {
        match self {
            ChartKind::Sensor => None,
            ChartKind::Kettle => Some(ControllerKind::Kettle),
            ChartKind::Fermenter => Some(ControllerKind::Fermenter),
        }
    }
}

impl FromStr for ChartKind {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "s" => Ok(ChartKind::Sensor),
            "k" => Ok(ChartKind::Kettle),
            "f" => Ok(ChartKind::Fermenter),
            other => Err(LogError::UnknownChartType(other.to_string())),
        }
    }
}

/// One named data stream for charting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    pub data: Vec<LogRecord>,
}
