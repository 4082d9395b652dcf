//! View settings
//!
//! Every user-selectable chart option in one explicit struct. Settings come
//! from a YAML file or from URL query pairs; a value that does not parse is
//! ignored and the default kept.

use crate::classification::DigitLevel;
use crate::composition::{CompositionType, FilterParams};
use crate::selection::HiddenSectors;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Malformed settings: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// How industry-space nodes are sized
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeSizing {
    Uniform,
    GlobalCompanies,
    GlobalEmployees,
    CityCompanies,
    #[default]
    CityEmployees,
}

impl NodeSizing {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeSizing::Uniform => "uniform",
            NodeSizing::GlobalCompanies => "global_companies",
            NodeSizing::GlobalEmployees => "global_employees",
            NodeSizing::CityCompanies => "city_companies",
            NodeSizing::CityEmployees => "city_employees",
        }
    }

    /// True for the modes that size nodes from one city's rows
    pub fn needs_city_rows(&self) -> bool {
        matches!(self, NodeSizing::CityCompanies | NodeSizing::CityEmployees)
    }
}

impl FromStr for NodeSizing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        from_name(&s.trim().to_ascii_lowercase())
            .ok_or_else(|| format!("unknown node sizing: {}", s))
    }
}

impl fmt::Display for NodeSizing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How cluster outlines are drawn over the industry space
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterMode {
    #[default]
    Outline,
    Overlay,
    None,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    pub digit_level: DigitLevel,
    pub composition_type: CompositionType,
    pub node_sizing: NodeSizing,
    #[serde(alias = "cluster_overlay")]
    pub cluster_mode: ClusterMode,
}

impl ViewSettings {
    pub fn from_yaml_str(yaml: &str) -> SettingsResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> SettingsResult<Self> {
        Self::from_yaml_str(&std::fs::read_to_string(path)?)
    }

    /// Read settings from URL query pairs such as `digit_level=6`
    pub fn from_query_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut settings = ViewSettings::default();
        for (key, value) in pairs {
            match key {
                "digit_level" => set_parsed(&mut settings.digit_level, key, value.parse().ok()),
                "composition_type" => {
                    set_parsed(&mut settings.composition_type, key, value.parse().ok())
                }
                "node_sizing" => set_parsed(&mut settings.node_sizing, key, value.parse().ok()),
                "cluster_overlay" | "cluster_mode" => {
                    set_parsed(&mut settings.cluster_mode, key, from_name(value))
                }
                _ => {}
            }
        }
        settings
    }

    /// Parameters for one run of the composition pipeline
    pub fn filter_params(&self, hidden_sectors: &HiddenSectors) -> FilterParams {
        FilterParams::new(self.digit_level, self.composition_type)
            .with_hidden_sectors(hidden_sectors.clone())
    }
}

fn from_name<T: DeserializeOwned>(value: &str) -> Option<T> {
    serde_json::from_value(serde_json::Value::String(value.to_string())).ok()
}

fn set_parsed<T>(slot: &mut T, key: &str, parsed: Option<T>) {
    match parsed {
        Some(value) => *slot = value,
        None => warn!("Ignoring invalid value for query parameter {}", key),
    }
}
