//! Layout/sizing mapper
//!
//! Every static node must resolve in the classification index; an unknown
//! id means the static reference files are out of sync and mapping fails.
//! A missing sector color is not an error here: the node keeps its place
//! and takes the neutral low-intensity color.

use super::scale::{RadiusBounds, RadiusScales};
use super::{GlobalIndustryAggregates, IndustrySpaceLayout, LayoutEdge, LayoutNode, StaticLayout};
use crate::classification::{ClassificationIndex, IndustryId};
use crate::composition::CompositionType;
use crate::palette::SectorPalette;
use thiserror::Error;
use tracing::{debug, warn};

/// Layout errors
#[derive(Error, Debug)]
pub enum LayoutError {
    /// Static graph references an industry missing from the classification index
    #[error("Static layout node {0} has no classification")]
    UnknownIndustry(IndustryId),

    #[error("Malformed layout data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read layout data: {0}")]
    Io(#[from] std::io::Error),
}

pub type LayoutResult<T> = Result<T, LayoutError>;

/// Joins the static graph against reference data
pub struct LayoutMapper<'a> {
    index: &'a ClassificationIndex,
    palette: &'a SectorPalette,
}

impl<'a> LayoutMapper<'a> {
    pub fn new(index: &'a ClassificationIndex, palette: &'a SectorPalette) -> Self {
        LayoutMapper { index, palette }
    }

    /// Produce a decorated copy of `layout`; the static source is untouched
    pub fn map(
        &self,
        layout: &StaticLayout,
        aggregates: &GlobalIndustryAggregates,
    ) -> LayoutResult<IndustrySpaceLayout> {
        let min_max = aggregates.global_min_max.as_ref();
        let company_bounds = RadiusBounds::from_min_max(min_max, CompositionType::Companies);
        let employee_bounds = RadiusBounds::from_min_max(min_max, CompositionType::Employees);

        let mut neutral = 0usize;
        let nodes = layout
            .nodes
            .iter()
            .map(|node| -> LayoutResult<LayoutNode> {
                let industry = self
                    .index
                    .lookup(&node.id)
                    .ok_or_else(|| LayoutError::UnknownIndustry(node.id.clone()))?;
                let sector_id = &industry.top_level_parent_id;
                let sector_name = self
                    .index
                    .lookup(sector_id)
                    .map(|s| s.display_name().to_string())
                    .unwrap_or_default();
                let color = match self.palette.color_for(sector_id) {
                    Some(color) => color,
                    None => {
                        neutral += 1;
                        self.palette.color_or_neutral(sector_id)
                    }
                };
                let global = aggregates
                    .industries
                    .get(&industry.id)
                    .copied()
                    .unwrap_or_default();

                Ok(LayoutNode {
                    id: industry.id.clone(),
                    name: industry.display_name().to_string(),
                    code: industry.code.clone().unwrap_or_default(),
                    color: color.to_string(),
                    industry_color: color.to_string(),
                    sector_name,
                    continent: node.continent.clone(),
                    country: node.country.clone(),
                    edges: node
                        .edges
                        .iter()
                        .map(|e| LayoutEdge {
                            target: e.trg.clone(),
                            proximity: e.proximity,
                        })
                        .collect(),
                    x: node.x,
                    y: node.y,
                    global_sum_num_company: global.sum_num_company,
                    global_sum_num_employ: global.sum_num_employ,
                    radius: None,
                })
            })
            .collect::<LayoutResult<Vec<_>>>()?;

        if neutral > 0 {
            warn!("{} industry space nodes have no sector color, using neutral", neutral);
        }
        debug!(
            "Mapped {} industry space nodes, company domain [{}, {}], employee domain [{}, {}]",
            nodes.len(),
            company_bounds.min,
            company_bounds.max,
            employee_bounds.min,
            employee_bounds.max
        );

        Ok(IndustrySpaceLayout {
            clusters: layout.clusters.clone(),
            nodes,
            company_scales: RadiusScales::new(company_bounds),
            employee_scales: RadiusScales::new(employee_bounds),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::RawIndustryRow;
    use crate::layout::RadiusScaleKind;
    use crate::palette::LOW_INTENSITY_NODE_COLOR;
    use crate::settings::{ClusterMode, NodeSizing, ViewSettings};

    fn index() -> ClassificationIndex {
        ClassificationIndex::from_json_str(
            r#"[
                {"id": "54", "name": "Professional Services", "level": 1, "topLevelParentId": "54"},
                {"id": "92", "name": "Public Administration", "level": 1, "topLevelParentId": "92"},
                {"id": "541110", "name": "Offices of Lawyers", "level": 6, "topLevelParentId": "54", "code": "541110"},
                {"id": "921110", "name": "Executive Offices", "level": 6, "topLevelParentId": "92", "code": "921110"}
            ]"#,
        )
        .unwrap()
    }

    fn palette() -> SectorPalette {
        SectorPalette::from_json_str(r##"[{"id": "54", "color": "#ff0000"}]"##).unwrap()
    }

    const LAYOUT: &str = r##"{
        "nodes": [
            {"id": 541110, "x": 10.5, "y": 20.0, "continent": "1", "country": "1-2",
             "edges": [{"trg": 921110, "proximity": 0.42}]},
            {"id": 921110, "x": -3.0, "y": 7.25, "edges": []}
        ],
        "clusters": {
            "continents": [{"center": [1.0, 2.0], "color": "#123456", "clusterCode": 1,
                            "clusterId": "1", "name": "Services", "polygon": [[0.0, 0.0]]}],
            "countries": []
        }
    }"##;

    const AGGREGATES: &str = r#"{
        "industries": {"541110": {"sumNumCompany": 500, "sumNumEmploy": 9000}},
        "globalMinMax": {"minSumNumCompany": 10, "maxSumNumCompany": 1000,
                         "minSumNumEmploy": 1000, "maxSumNumEmploy": 9000}
    }"#;

    #[test]
    fn test_map_decorates_every_node() {
        let layout = StaticLayout::from_json_str(LAYOUT).unwrap();
        let aggregates = GlobalIndustryAggregates::from_json_str(AGGREGATES).unwrap();
        let (index, palette) = (index(), palette());

        let result = LayoutMapper::new(&index, &palette).map(&layout, &aggregates).unwrap();

        assert_eq!(result.nodes.len(), layout.nodes.len());
        assert_eq!(result.clusters, layout.clusters);
        assert_eq!(result.clusters.continents[0].color, "#123456");

        let lawyers = &result.nodes[0];
        assert_eq!(lawyers.name, "Offices of Lawyers");
        assert_eq!(lawyers.code, "541110");
        assert_eq!(lawyers.color, "#ff0000");
        assert_eq!(lawyers.industry_color, "#ff0000");
        assert_eq!(lawyers.sector_name, "Professional Services");
        assert_eq!(lawyers.global_sum_num_company, 500.0);
        assert_eq!(lawyers.global_sum_num_employ, 9000.0);
        assert_eq!(lawyers.edges[0].target, IndustryId::new("921110"));
        assert_eq!(lawyers.edges[0].proximity, 0.42);
        assert!(lawyers.radius.is_none());

        let exec = &result.nodes[1];
        assert_eq!(exec.color, LOW_INTENSITY_NODE_COLOR);
        assert_eq!(exec.sector_name, "Public Administration");
        assert_eq!(exec.global_sum_num_company, 0.0);
    }

    #[test]
    fn test_scales_follow_global_bounds() {
        let layout = StaticLayout::from_json_str(LAYOUT).unwrap();
        let aggregates = GlobalIndustryAggregates::from_json_str(AGGREGATES).unwrap();
        let (index, palette) = (index(), palette());

        let result = LayoutMapper::new(&index, &palette).map(&layout, &aggregates).unwrap();
        assert_eq!(result.company_scales.bounds.min, 10.0);
        assert_eq!(result.company_scales.bounds.max, 1000.0);
        assert_eq!(result.employee_scales.bounds.min, 1000.0);
        assert_eq!(result.employee_scales.bounds.max, 9000.0);

        let sized = result.with_radii(RadiusScaleKind::Linear);
        let expected = 5.0 + 10.0 * (490.0 / 990.0);
        assert!((sized[0].radius.unwrap() - expected).abs() < 1e-9);
        // static node untouched
        assert!(result.nodes[0].radius.is_none());
    }

    #[test]
    fn test_missing_bounds_use_defaults() {
        let layout = StaticLayout::from_json_str(LAYOUT).unwrap();
        let (index, palette) = (index(), palette());

        let result = LayoutMapper::new(&index, &palette)
            .map(&layout, &GlobalIndustryAggregates::default())
            .unwrap();
        assert_eq!(result.company_scales.bounds, RadiusBounds::default());
        assert_eq!(result.employee_scales.bounds, RadiusBounds::default());
    }

    #[test]
    fn test_unknown_industry_fails() {
        let layout = StaticLayout::from_json_str(
            r#"{"nodes": [{"id": 111111, "x": 0.0, "y": 0.0}]}"#,
        )
        .unwrap();
        let (index, palette) = (index(), palette());

        let result = LayoutMapper::new(&index, &palette).map(&layout, &GlobalIndustryAggregates::default());
        assert!(matches!(result, Err(LayoutError::UnknownIndustry(id)) if id.as_str() == "111111"));
    }

    fn mapped() -> IndustrySpaceLayout {
        let layout = StaticLayout::from_json_str(LAYOUT).unwrap();
        let aggregates = GlobalIndustryAggregates::from_json_str(AGGREGATES).unwrap();
        let (index, palette) = (index(), palette());
        LayoutMapper::new(&index, &palette).map(&layout, &aggregates).unwrap()
    }

    fn radii(nodes: &[LayoutNode]) -> Vec<f64> {
        nodes.iter().map(|n| n.radius.unwrap()).collect()
    }

    #[test]
    fn test_sizing_uniform() {
        let space = mapped();
        let sized = space.sized(NodeSizing::Uniform, RadiusScaleKind::Linear, &[]);
        assert_eq!(radii(&sized), vec![10.0, 10.0]);
        let sized = space.sized(NodeSizing::Uniform, RadiusScaleKind::Log, &[]);
        assert_eq!(radii(&sized), vec![5.25, 5.25]);
    }

    #[test]
    fn test_sizing_global_metrics_use_their_own_bounds() {
        let space = mapped();

        let companies = space.sized(NodeSizing::GlobalCompanies, RadiusScaleKind::Linear, &[]);
        assert_eq!(companies, space.with_radii(RadiusScaleKind::Linear));
        let expected = 5.0 + 10.0 * (490.0 / 990.0);
        assert!((companies[0].radius.unwrap() - expected).abs() < 1e-9);

        // 9000 employees is the employee maximum
        let employees = space.sized(NodeSizing::GlobalEmployees, RadiusScaleKind::Linear, &[]);
        assert_eq!(employees[0].radius, Some(15.0));
        assert_ne!(employees[0].radius, companies[0].radius);

        let log = space.sized(NodeSizing::GlobalEmployees, RadiusScaleKind::Log, &[]);
        assert_eq!(log[0].radius, Some(8.5));
    }

    #[test]
    fn test_sizing_city_metrics_scale_over_city_counts() {
        let space = mapped();
        let rows = vec![
            RawIndustryRow::new("541110", Some(4), Some(80)),
            RawIndustryRow::new("921110", Some(20), Some(10)),
        ];

        let by_companies = space.sized(NodeSizing::CityCompanies, RadiusScaleKind::Linear, &rows);
        assert_eq!(radii(&by_companies), vec![5.0, 15.0]);

        let by_employees = space.sized(NodeSizing::CityEmployees, RadiusScaleKind::Linear, &rows);
        assert_eq!(radii(&by_employees), vec![15.0, 5.0]);

        let by_employees_log = space.sized(NodeSizing::CityEmployees, RadiusScaleKind::Log, &rows);
        assert_eq!(radii(&by_employees_log), vec![8.5, 2.0]);
    }

    #[test]
    fn test_view_follows_settings() {
        let space = mapped();
        let settings = ViewSettings {
            node_sizing: NodeSizing::Uniform,
            cluster_mode: ClusterMode::None,
            ..ViewSettings::default()
        };

        let view = space.view(&settings, RadiusScaleKind::Linear, &[]);
        assert!(view.clusters.continents.is_empty());
        assert_eq!(radii(&view.nodes), vec![10.0, 10.0]);

        let outlined = ViewSettings {
            node_sizing: NodeSizing::GlobalEmployees,
            cluster_mode: ClusterMode::Outline,
            ..ViewSettings::default()
        };
        let view = space.view(&outlined, RadiusScaleKind::Linear, &[]);
        assert_eq!(view.clusters, space.clusters);
        assert_eq!(view.nodes[0].radius, Some(15.0));
    }
}
