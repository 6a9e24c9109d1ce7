//! Generated datasets and presets.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::element::Element;
use crate::io::AlgorithmInput;

/// Shape of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum DataType {
    /// A sequence of elements.
    Array,
    /// A node and edge graph.
    Graph,
}

impl DataType {
    /// Looks up a data type by wire name.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "array" => Some(Self::Array),
            "graph" => Some(Self::Graph),
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Array => f.write_str("array"),
            Self::Graph => f.write_str("graph"),
        }
    }
}

/// Summary statistics of a generated array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ArrayMetadata {
    /// Smallest value.
    pub min_value: Element,
    /// Largest value.
    pub max_value: Element,
    /// Elements equal to an earlier element.
    pub duplicates: usize,
    /// Non-decreasing order.
    pub sorted: bool,
    /// Non-increasing order.
    pub reversed: bool,
    /// No duplicates.
    pub unique: bool,
}

/// A generated dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GeneratedData {
    /// Shape of the content.
    #[serde(rename = "type")]
    pub kind: DataType,
    /// Elements or nodes produced.
    pub size: usize,
    /// Pattern used.
    pub pattern: String,
    /// The data itself.
    pub content: AlgorithmInput,
    /// Statistics for arrays.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub metadata: Option<ArrayMetadata>,
}

/// A curated dataset shipped with the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct DataPreset {
    /// Preset key.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Shape of the data.
    pub data_type: DataType,
    /// Elements or nodes.
    pub size: usize,
    /// Pattern name.
    pub pattern: String,
    /// The data itself.
    pub data: AlgorithmInput,
    /// Search tags.
    pub tags: Vec<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}
