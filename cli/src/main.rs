//! Metroverse CLI — run the derived-metrics pipelines over JSON reference data
//!
//! Reads classification, palette, city row and layout files produced by the
//! data API and prints chart-ready results.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::{ContentArrangement, Table};
use metroverse::composition::aggregate_by_industry;
use metroverse::{
    aggregate_by_sector, compare_cities, filter_rows, summarize_composition, ClassificationIndex,
    CompositionType, DigitLevel, DisplayState, FilterParams, GlobalIndustryAggregates, HiddenSectors,
    IndustryId, LayoutMapper, NodeSizing, RadiusScaleKind, RawIndustryRow, SectorPalette,
    StaticLayout, ViewSettings,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "metroverse", version, about = "Metroverse derived industry metrics")]
struct Cli {
    /// YAML view settings supplying defaults for level, metric, node sizing and clusters
    #[arg(long, global = true, env = "METROVERSE_SETTINGS")]
    settings: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Clone, Copy, ValueEnum)]
enum GroupBy {
    Sector,
    Industry,
}

/// Options shared by the filtering commands
#[derive(clap::Args)]
struct FilterArgs {
    /// Classification reference table (JSON array)
    #[arg(long)]
    classifications: PathBuf,

    /// Sector color table (JSON array)
    #[arg(long)]
    colors: PathBuf,

    /// Digit level: 1 (sector) through 6
    #[arg(long)]
    level: Option<DigitLevel>,

    /// companies or employees
    #[arg(long)]
    metric: Option<CompositionType>,

    /// Sector id to hide; repeatable
    #[arg(long = "hide")]
    hidden: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ranked composition of one city
    Composition {
        #[command(flatten)]
        filter: FilterArgs,

        /// City industry rows (JSON array)
        #[arg(long)]
        rows: PathBuf,

        #[arg(long, value_enum, default_value = "sector")]
        by: GroupBy,
    },
    /// Side-by-side composition of two cities
    Compare {
        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long)]
        primary: PathBuf,

        #[arg(long)]
        secondary: PathBuf,
    },
    /// Largest sectors and industries of one city
    Summary {
        #[arg(long)]
        classifications: PathBuf,

        #[arg(long)]
        rows: PathBuf,

        #[arg(long)]
        metric: Option<CompositionType>,
    },
    /// Decorated industry space nodes with radii
    Layout {
        #[command(flatten)]
        layout: LayoutArgs,
    },
}

/// Options of the layout command
#[derive(clap::Args)]
struct LayoutArgs {
    #[arg(long)]
    classifications: PathBuf,

    #[arg(long)]
    colors: PathBuf,

    /// Static node/edge/cluster graph
    #[arg(long)]
    graph: PathBuf,

    /// Global per-industry sums with min/max bounds
    #[arg(long)]
    aggregates: PathBuf,

    #[arg(long, default_value = "linear")]
    scale: RadiusScaleKind,

    /// uniform, global_companies, global_employees, city_companies or city_employees
    #[arg(long)]
    sizing: Option<NodeSizing>,

    /// City industry rows, required by the city sizing modes
    #[arg(long)]
    rows: Option<PathBuf>,
}

/// Tabular view of a result for table and CSV output
struct Rows {
    columns: Vec<&'static str>,
    records: Vec<Vec<String>>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let settings = match &cli.settings {
        Some(path) => ViewSettings::from_yaml_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => ViewSettings::default(),
    };

    match &cli.command {
        Commands::Composition { filter, rows, by } => {
            run_composition(filter, rows, *by, &settings, &cli.format)
        }
        Commands::Compare { filter, primary, secondary } => {
            run_compare(filter, primary, secondary, &settings, &cli.format)
        }
        Commands::Summary { classifications, rows, metric } => {
            let metric = metric.unwrap_or(settings.composition_type);
            run_summary(classifications, rows, metric, &cli.format)
        }
        Commands::Layout { layout } => run_layout(layout, &settings, &cli.format),
    }
}

fn load_index(path: &Path) -> Result<ClassificationIndex> {
    ClassificationIndex::from_json_file(path)
        .with_context(|| format!("loading classifications from {}", path.display()))
}

fn load_palette(path: &Path) -> Result<SectorPalette> {
    SectorPalette::from_json_file(path)
        .with_context(|| format!("loading sector colors from {}", path.display()))
}

fn load_rows(path: &Path) -> Result<Vec<RawIndustryRow>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading city rows from {}", path.display()))?;
    let rows: Vec<RawIndustryRow> = serde_json::from_str(&json)
        .with_context(|| format!("parsing city rows from {}", path.display()))?;
    debug!("Loaded {} rows from {:?}", rows.len(), path);
    Ok(rows)
}

fn run_composition(
    args: &FilterArgs,
    rows_path: &Path,
    by: GroupBy,
    settings: &ViewSettings,
    format: &OutputFormat,
) -> Result<()> {
    let index = load_index(&args.classifications)?;
    let palette = load_palette(&args.colors)?;
    let rows = load_rows(rows_path)?;
    let params = filter_params(args, settings);

    let composition = filter_rows(&index, &palette, &rows, &params);
    if composition.display_state() == DisplayState::NoSectorsSelected {
        println!("(no sectors selected)");
        return Ok(());
    }

    let ranked = match by {
        GroupBy::Sector => aggregate_by_sector(&composition, &index),
        GroupBy::Industry => aggregate_by_industry(&composition),
    };

    let table = Rows {
        columns: vec!["id", "name", params.metric.as_str(), "share %"],
        records: ranked
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.title.clone(),
                    r.value.to_string(),
                    format!("{:.2}", r.share_percent()),
                ]
            })
            .collect(),
    };
    print_output(&ranked, table, format)?;
    if matches!(format, OutputFormat::Table) {
        println!("Total {}: {}", params.metric, composition.total);
    }
    Ok(())
}

fn run_compare(
    args: &FilterArgs,
    primary_path: &Path,
    secondary_path: &Path,
    settings: &ViewSettings,
    format: &OutputFormat,
) -> Result<()> {
    let index = load_index(&args.classifications)?;
    let palette = load_palette(&args.colors)?;
    let primary = load_rows(primary_path)?;
    let secondary = load_rows(secondary_path)?;
    let params = filter_params(args, settings);

    let pair = compare_cities(&index, &palette, &primary, &secondary, &params);
    if pair.display_state() == DisplayState::NoSectorsSelected {
        println!("(no sectors selected)");
        return Ok(());
    }

    let aligned = pair.aligned();
    let share = |v: Option<f64>| v.map(|s| format!("{:.2}", s * 100.0)).unwrap_or_default();
    let count = |v: Option<u64>| v.map(|c| c.to_string()).unwrap_or_default();
    let table = Rows {
        columns: vec!["id", "name", "primary", "primary %", "secondary", "secondary %"],
        records: aligned
            .iter()
            .map(|d| {
                vec![
                    d.id.to_string(),
                    d.title.clone(),
                    count(d.primary),
                    share(pair.primary_share(d)),
                    count(d.secondary),
                    share(pair.secondary_share(d)),
                ]
            })
            .collect(),
    };
    print_output(&pair, table, format)?;
    if matches!(format, OutputFormat::Table) {
        println!(
            "Totals {}: primary {}, secondary {}",
            params.metric, pair.primary.total, pair.secondary.total
        );
    }
    Ok(())
}

fn run_summary(
    classifications: &Path,
    rows_path: &Path,
    metric: CompositionType,
    format: &OutputFormat,
) -> Result<()> {
    let index = load_index(classifications)?;
    let rows = load_rows(rows_path)?;

    let Some(summary) = summarize_composition(&index, &rows, metric) else {
        println!("(not enough sectors to summarize)");
        return Ok(());
    };

    let mut records = Vec::new();
    for (rank, sector) in [("1", &summary.largest), ("2", &summary.second)] {
        records.push(vec![
            rank.to_string(),
            sector.name.clone(),
            format!("{:.2}", sector.share_percent),
            sector.top_industry.as_ref().map(|i| i.name.clone()).unwrap_or_default(),
            sector
                .top_industry
                .as_ref()
                .map(|i| format!("{:.2}", i.share_percent))
                .unwrap_or_default(),
        ]);
    }
    let table = Rows {
        columns: vec!["rank", "sector", "sector %", "largest 3-digit industry", "industry %"],
        records,
    };
    print_output(&summary, table, format)
}

fn run_layout(args: &LayoutArgs, settings: &ViewSettings, format: &OutputFormat) -> Result<()> {
    let view_settings = layout_settings(args, settings);
    let city_rows = match &args.rows {
        Some(path) => load_rows(path)?,
        None if view_settings.node_sizing.needs_city_rows() => {
            bail!(
                "node sizing {} needs --rows; pass --sizing to size from global sums",
                view_settings.node_sizing
            )
        }
        None => Vec::new(),
    };

    let index = load_index(&args.classifications)?;
    let palette = load_palette(&args.colors)?;
    let layout = StaticLayout::from_json_file(&args.graph)
        .with_context(|| format!("loading industry space from {}", args.graph.display()))?;
    let aggregates = GlobalIndustryAggregates::from_json_file(&args.aggregates)
        .with_context(|| format!("loading global aggregates from {}", args.aggregates.display()))?;

    let space = LayoutMapper::new(&index, &palette).map(&layout, &aggregates)?;
    let view = space.view(&view_settings, args.scale, &city_rows);

    let table = Rows {
        columns: vec![
            "id",
            "name",
            "sector",
            "color",
            "global companies",
            "global employees",
            "radius",
        ],
        records: view
            .nodes
            .iter()
            .map(|n| {
                vec![
                    n.id.to_string(),
                    n.name.clone(),
                    n.sector_name.clone(),
                    n.color.clone(),
                    n.global_sum_num_company.to_string(),
                    n.global_sum_num_employ.to_string(),
                    n.radius.map(|r| format!("{:.2}", r)).unwrap_or_default(),
                ]
            })
            .collect(),
    };
    print_output(&view, table, format)?;
    if matches!(format, OutputFormat::Table) {
        println!(
            "Sized by {} ({} scale), {} continent and {} country clusters",
            view_settings.node_sizing,
            args.scale,
            view.clusters.continents.len(),
            view.clusters.countries.len()
        );
    }
    Ok(())
}

fn layout_settings(args: &LayoutArgs, settings: &ViewSettings) -> ViewSettings {
    let mut view = settings.clone();
    if let Some(sizing) = args.sizing {
        view.node_sizing = sizing;
    }
    view
}

fn filter_params(args: &FilterArgs, settings: &ViewSettings) -> FilterParams {
    let mut view = settings.clone();
    if let Some(level) = args.level {
        view.digit_level = level;
    }
    if let Some(metric) = args.metric {
        view.composition_type = metric;
    }
    let hidden: HiddenSectors = args.hidden.iter().map(|id| IndustryId::new(id.as_str())).collect();
    view.filter_params(&hidden)
}

fn print_output<T: Serialize>(value: &T, rows: Rows, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        OutputFormat::Csv => {
            println!("{}", rows.columns.join(","));
            for record in &rows.records {
                let cells: Vec<String> = record.iter().map(|v| format_csv_value(v)).collect();
                println!("{}", cells.join(","));
            }
        }
        OutputFormat::Table => {
            if rows.records.is_empty() {
                println!("(no results)");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(&rows.columns);
            for record in &rows.records {
                table.add_row(record);
            }

            println!("{}", table);
            println!("{} row(s)", rows.records.len());
        }
    }
    Ok(())
}

fn format_csv_value(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_csv_value() {
        assert_eq!(format_csv_value("plain"), "plain");
        assert_eq!(
            format_csv_value("Professional, Scientific"),
            "\"Professional, Scientific\""
        );
        assert_eq!(format_csv_value("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;

        let command = Cli::command();
        command.clone().debug_assert();
        let settings = command
            .get_arguments()
            .find(|arg| arg.get_id() == "settings")
            .unwrap();
        assert_eq!(
            settings.get_env(),
            Some(std::ffi::OsStr::new("METROVERSE_SETTINGS"))
        );
    }

    #[test]
    fn test_cli_parses_composition() {
        let cli = Cli::try_parse_from([
            "metroverse",
            "--format",
            "json",
            "composition",
            "--classifications",
            "c.json",
            "--colors",
            "p.json",
            "--rows",
            "r.json",
            "--level",
            "6",
            "--metric",
            "companies",
            "--hide",
            "54",
            "--hide",
            "31",
            "--by",
            "industry",
        ])
        .unwrap();

        match cli.command {
            Commands::Composition { filter, by, .. } => {
                assert_eq!(filter.level, Some(DigitLevel::Six));
                assert_eq!(filter.metric, Some(CompositionType::Companies));
                assert_eq!(filter.hidden, vec!["54", "31"]);
                assert!(matches!(by, GroupBy::Industry));
            }
            _ => panic!("expected composition command"),
        }
    }

    #[test]
    fn test_flags_override_settings() {
        let args = FilterArgs {
            classifications: PathBuf::from("c.json"),
            colors: PathBuf::from("p.json"),
            level: Some(DigitLevel::Sector),
            metric: None,
            hidden: vec!["12".to_string()],
        };
        let settings = ViewSettings {
            composition_type: CompositionType::Companies,
            ..ViewSettings::default()
        };

        let params = filter_params(&args, &settings);
        assert_eq!(params.digit_level, DigitLevel::Sector);
        assert_eq!(params.metric, CompositionType::Companies);
        assert!(params.hidden_sectors.contains(&IndustryId::new("12")));
    }

    #[test]
    fn test_layout_sizing_flag_overrides_settings() {
        let cli = Cli::try_parse_from([
            "metroverse",
            "layout",
            "--classifications",
            "c.json",
            "--colors",
            "p.json",
            "--graph",
            "g.json",
            "--aggregates",
            "a.json",
            "--scale",
            "log",
            "--sizing",
            "global_employees",
        ])
        .unwrap();

        let Commands::Layout { layout } = cli.command else {
            panic!("expected layout command");
        };
        assert_eq!(layout.scale, RadiusScaleKind::Log);
        assert!(layout.rows.is_none());

        let settings = ViewSettings {
            node_sizing: NodeSizing::CityEmployees,
            ..ViewSettings::default()
        };
        assert_eq!(layout_settings(&layout, &settings).node_sizing, NodeSizing::GlobalEmployees);

        let unflagged = LayoutArgs { sizing: None, ..layout };
        assert_eq!(layout_settings(&unflagged, &settings).node_sizing, NodeSizing::CityEmployees);
    }

    #[test]
    fn test_city_sizing_without_rows_is_rejected() {
        let args = LayoutArgs {
            classifications: PathBuf::from("c.json"),
            colors: PathBuf::from("p.json"),
            graph: PathBuf::from("g.json"),
            aggregates: PathBuf::from("a.json"),
            scale: RadiusScaleKind::Linear,
            sizing: Some(NodeSizing::CityCompanies),
            rows: None,
        };

        let err = run_layout(&args, &ViewSettings::default(), &OutputFormat::Json).unwrap_err();
        assert!(err.to_string().contains("--rows"));
    }
}
