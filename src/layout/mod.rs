//! Industry space layout
//!
//! Decorates the static industry-relatedness graph (precomputed positions,
//! proximity edges, cluster outlines) with classification names, sector
//! colors, global counts and radius scales, then sizes nodes the way the
//! view settings ask.

pub mod mapper;
pub mod scale;

pub use mapper::{LayoutError, LayoutMapper, LayoutResult};
pub use scale::{RadiusBounds, RadiusScaleKind, RadiusScales};

use crate::classification::IndustryId;
use crate::composition::{CompositionType, RawIndustryRow};
use crate::settings::{ClusterMode, NodeSizing, ViewSettings};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Proximity edge in the static graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticEdge {
    pub trg: IndustryId,
    pub proximity: f64,
}

/// Node as stored in the static layout file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticNode {
    pub id: IndustryId,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub continent: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub edges: Vec<StaticEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinentCluster {
    pub center: Vec<f64>,
    pub color: String,
    pub cluster_code: i64,
    pub cluster_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub polygon: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryCluster {
    #[serde(flatten)]
    pub cluster: ContinentCluster,
    pub continent: String,
}

/// Cluster outlines; passed through untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Clusters {
    #[serde(default)]
    pub continents: Vec<ContinentCluster>,
    #[serde(default)]
    pub countries: Vec<CountryCluster>,
}

/// The static `{nodes, clusters}` reference graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticLayout {
    pub nodes: Vec<StaticNode>,
    #[serde(default)]
    pub clusters: Clusters,
}

impl StaticLayout {
    pub fn from_json_str(json: &str) -> LayoutResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> LayoutResult<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }
}

/// Sums of one industry across all cities
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryAggregate {
    #[serde(default)]
    pub sum_num_company: f64,
    #[serde(default)]
    pub sum_num_employ: f64,
}

/// Extremes of the per-industry sums
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalMinMax {
    #[serde(default)]
    pub min_sum_num_company: Option<f64>,
    #[serde(default)]
    pub max_sum_num_company: Option<f64>,
    #[serde(default)]
    pub min_sum_num_employ: Option<f64>,
    #[serde(default)]
    pub max_sum_num_employ: Option<f64>,
}

/// Global per-industry sums with their precomputed bounds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalIndustryAggregates {
    #[serde(default)]
    pub industries: FxHashMap<IndustryId, IndustryAggregate>,
    #[serde(default)]
    pub global_min_max: Option<GlobalMinMax>,
}

impl GlobalIndustryAggregates {
    pub fn from_json_str(json: &str) -> LayoutResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> LayoutResult<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }
}

/// Edge of a decorated node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutEdge {
    pub target: IndustryId,
    pub proximity: f64,
}

/// Static node decorated for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutNode {
    pub id: IndustryId,
    pub name: String,
    pub code: String,
    pub color: String,
    pub industry_color: String,
    pub sector_name: String,
    pub continent: String,
    pub country: String,
    pub edges: Vec<LayoutEdge>,
    pub x: f64,
    pub y: f64,
    pub global_sum_num_company: f64,
    pub global_sum_num_employ: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

/// Decorated industry space ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustrySpaceLayout {
    pub clusters: Clusters,
    pub nodes: Vec<LayoutNode>,
    /// Scales over the global company sums
    pub company_scales: RadiusScales,
    /// Scales over the global employee sums
    pub employee_scales: RadiusScales,
}

/// Nodes and clusters as one view draws them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpaceView {
    pub clusters: Clusters,
    pub nodes: Vec<LayoutNode>,
}

impl IndustrySpaceLayout {
    /// Radius from the global company sum
    pub fn radius_for(&self, node: &LayoutNode, kind: RadiusScaleKind) -> f64 {
        self.company_scales.apply(kind, node.global_sum_num_company)
    }

    /// Copy of the nodes with `radius` filled in from the global company sums
    pub fn with_radii(&self, kind: RadiusScaleKind) -> Vec<LayoutNode> {
        self.sized(NodeSizing::GlobalCompanies, kind, &[])
    }

    /// Copy of the nodes with `radius` filled in per `sizing`.
    ///
    /// City modes scale over the extent of that city's counts; `city_rows`
    /// is ignored by the other modes.
    pub fn sized(
        &self,
        sizing: NodeSizing,
        kind: RadiusScaleKind,
        city_rows: &[RawIndustryRow],
    ) -> Vec<LayoutNode> {
        let radii: Vec<f64> = match sizing {
            NodeSizing::Uniform => {
                let radius = self.company_scales.uniform(kind);
                vec![radius; self.nodes.len()]
            }
            NodeSizing::GlobalCompanies => self
                .nodes
                .iter()
                .map(|n| self.company_scales.apply(kind, n.global_sum_num_company))
                .collect(),
            NodeSizing::GlobalEmployees => self
                .nodes
                .iter()
                .map(|n| self.employee_scales.apply(kind, n.global_sum_num_employ))
                .collect(),
            NodeSizing::CityCompanies => self.city_radii(kind, city_rows, CompositionType::Companies),
            NodeSizing::CityEmployees => self.city_radii(kind, city_rows, CompositionType::Employees),
        };

        self.nodes
            .iter()
            .zip(radii)
            .map(|(node, radius)| LayoutNode {
                radius: Some(radius),
                ..node.clone()
            })
            .collect()
    }

    fn city_radii(
        &self,
        kind: RadiusScaleKind,
        city_rows: &[RawIndustryRow],
        metric: CompositionType,
    ) -> Vec<f64> {
        if city_rows.is_empty() {
            warn!("City node sizing by {} without city rows", metric);
        }
        let mut counts: FxHashMap<&IndustryId, u64> = FxHashMap::default();
        for row in city_rows {
            *counts.entry(&row.industry_id).or_insert(0) += row.count(metric);
        }
        let values: Vec<f64> = self
            .nodes
            .iter()
            .map(|n| counts.get(&n.id).copied().unwrap_or(0) as f64)
            .collect();

        let scales = RadiusScales::new(RadiusBounds::from_values(values.iter().copied()));
        values.iter().map(|v| scales.apply(kind, *v)).collect()
    }

    /// Cluster outlines to draw; none when clusters are switched off
    pub fn clusters_for(&self, mode: ClusterMode) -> Clusters {
        match mode {
            ClusterMode::None => Clusters::default(),
            ClusterMode::Outline | ClusterMode::Overlay => self.clusters.clone(),
        }
    }

    /// Sized nodes and visible clusters for one set of view settings
    pub fn view(
        &self,
        settings: &ViewSettings,
        kind: RadiusScaleKind,
        city_rows: &[RawIndustryRow],
    ) -> SpaceView {
        SpaceView {
            clusters: self.clusters_for(settings.cluster_mode),
            nodes: self.sized(settings.node_sizing, kind, city_rows),
        }
    }

    pub fn node(&self, id: &IndustryId) -> Option<&LayoutNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }
}
