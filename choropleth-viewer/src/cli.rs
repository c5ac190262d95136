//! Définition et implémentation des commandes CLI
//!
//! - `render`: limites GeoJSON + table de valeurs → GeoJSON colorié
//! - `scales`: liste des échelles disponibles

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use tracing::{error, info, warn};

use choropleth::{Delimiter, Inputs, ScaleName};

use crate::config::ViewerConfig;
use crate::export;
use crate::input;
use crate::report::{RenderReport, RenderStatus};
use crate::state::Viewer;

#[derive(Subcommand)]
pub enum Commands {
    /// Join a value table to boundary features and color them
    Render(RenderArgs),

    /// List the supported color scales with their endpoint colors
    Scales,
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Path to the GeoJSON boundary document
    #[arg(short, long)]
    pub boundary: PathBuf,

    /// Path to the key/value table (tab or comma separated)
    #[arg(short, long)]
    pub table: Option<PathBuf>,

    /// Color scale (viridis, plasma, inferno, magma, cividis, blues, turbo)
    #[arg(short, long)]
    pub scale: Option<ScaleName>,

    /// Invert the color scale
    #[arg(long)]
    pub invert: bool,

    /// Field delimiter of the table: tab, comma, auto
    #[arg(long)]
    pub delimiter: Option<Delimiter>,

    /// Config preset name (default/print/dark) or path to a JSON config
    #[arg(long, default_value = "default")]
    pub config: String,

    /// Output GeoJSON file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Add simplestyle properties (fill, stroke...) to each feature
    #[arg(long)]
    pub with_style: bool,

    /// Write a JSON render report to this file
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Encoding used when an input file is not valid UTF-8
    #[arg(long, default_value = input::DEFAULT_ENCODING)]
    pub encoding: String,
}

/// Exécute la commande render
pub fn cmd_render(args: &RenderArgs) -> Result<RenderReport> {
    let start = Instant::now();

    // Configuration: preset/fichier, puis environnement, puis options CLI
    let mut config = ViewerConfig::from_spec(&args.config)?;
    config.apply_env();
    apply_overrides(&mut config, args);

    let encoding = input::resolve_encoding(&args.encoding)?;
    let boundary = input::read_text(&args.boundary, encoding)?;
    let table = match &args.table {
        Some(path) => input::read_text(path, encoding)?,
        None => String::new(),
    };

    info!(
        boundary = %args.boundary.display(),
        table = ?args.table,
        scale = %config.scale,
        inverted = config.inverted,
        "Rendering choropleth"
    );

    let mut viewer = Viewer::new(&config);
    viewer.set_inputs(Inputs {
        boundary,
        table,
        selection: config.selection(),
        delimiter: config.delimiter,
    });

    let mut report = RenderReport::from_viewer(&viewer);
    report.set_duration(start.elapsed());

    if let Some(path) = &args.report {
        report
            .save_to_file(path)
            .context(format!("Failed to write report: {}", path.display()))?;
    }

    if let Some(error) = viewer.last_error() {
        error!(boundary = %args.boundary.display(), error, "Invalid boundary document");
        return Ok(report);
    }

    let Some(document) = viewer.frame().document.clone() else {
        warn!("Boundary document is empty, nothing to render");
        return Ok(report);
    };

    let style = args.with_style.then_some(&config.style);
    match &args.output {
        Some(path) => {
            if !is_geojson_path(path) {
                warn!(output = %path.display(), "Output file has no .geojson extension");
            }
            export::export_to_geojson(&document, style, path)?;
            info!(output = %path.display(), "GeoJSON written");
            report.display();
        }
        None => export::write_geojson(std::io::stdout().lock(), &document, style)?,
    }

    if report.stats.features > 0 && report.stats.matched == 0 && report.table_entries > 0 {
        warn!("No feature matched a table key (keys are compared to 'name' then 'code')");
    }

    Ok(report)
}

/// Exécute la commande scales
pub fn cmd_scales() -> Result<()> {
    println!("{:<10} {:<8} {:<8}", "SCALE", "START", "END");
    for (name, start, end) in scale_endpoints()? {
        println!("{:<10} {:<8} {:<8}", name, start, end);
    }
    Ok(())
}

fn scale_endpoints() -> Result<Vec<(ScaleName, String, String)>> {
    ScaleName::ALL
        .into_iter()
        .map(|name| {
            let ramp = name.ramp()?;
            Ok((name, ramp.hex_at(0.0), ramp.hex_at(1.0)))
        })
        .collect()
}

fn apply_overrides(config: &mut ViewerConfig, args: &RenderArgs) {
    if let Some(scale) = args.scale {
        config.scale = scale;
    }
    if args.invert {
        config.inverted = true;
    }
    if let Some(delimiter) = args.delimiter {
        config.delimiter = delimiter;
    }
}

/// Statut de sortie du processus pour un rapport
pub fn exit_code(report: &RenderReport) -> i32 {
    match report.status {
        RenderStatus::Rendered | RenderStatus::Empty => 0,
        RenderStatus::Failed => 1,
    }
}

/// Vrai si le chemin désigne un fichier GeoJSON par son extension
pub fn is_geojson_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("geojson") || e.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Commands,
    }

    fn fixture(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../choropleth/tests/fixtures")
            .join(name)
    }

    fn render_args(boundary: PathBuf, table: Option<PathBuf>) -> RenderArgs {
        RenderArgs {
            boundary,
            table,
            scale: None,
            invert: false,
            delimiter: None,
            config: "default".to_string(),
            output: None,
            with_style: false,
            report: None,
            encoding: input::DEFAULT_ENCODING.to_string(),
        }
    }

    #[test]
    fn test_parse_render_args() {
        let cli = TestCli::try_parse_from([
            "choropleth-viewer",
            "render",
            "--boundary",
            "regions.geojson",
            "--table",
            "regions.tsv",
            "--scale",
            "magma",
            "--invert",
            "--delimiter",
            "tab",
        ])
        .unwrap();

        let Commands::Render(args) = cli.command else {
            panic!("Expected render command");
        };
        assert_eq!(args.scale, Some(ScaleName::Magma));
        assert!(args.invert);
        assert_eq!(args.delimiter, Some(Delimiter::Tab));
        assert_eq!(args.config, "default");
    }

    #[test]
    fn test_parse_unknown_scale_rejected() {
        let result = TestCli::try_parse_from([
            "choropleth-viewer",
            "render",
            "--boundary",
            "a.geojson",
            "--scale",
            "rainbow",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = ViewerConfig::default();
        let mut args = render_args(PathBuf::from("a.geojson"), None);
        args.scale = Some(ScaleName::Cividis);
        args.invert = true;
        apply_overrides(&mut config, &args);
        assert_eq!(config.scale, ScaleName::Cividis);
        assert!(config.inverted);
        assert_eq!(config.delimiter, Delimiter::Auto);
    }

    #[test]
    fn test_render_to_file_with_report() {
        let dir = std::env::temp_dir().join(format!("choropleth-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let output = dir.join("regions.geojson");
        let report_path = dir.join("report.json");

        let mut args = render_args(fixture("regions.geojson"), Some(fixture("regions.tsv")));
        args.output = Some(output.clone());
        args.report = Some(report_path.clone());
        args.with_style = true;

        let report = cmd_render(&args).unwrap();
        assert_eq!(report.status, RenderStatus::Rendered);
        assert_eq!(exit_code(&report), 0);

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert!(json["features"][0]["properties"]["fill"].is_string());
        assert!(report_path.exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_render_malformed_boundary_reports_failure() {
        let dir = std::env::temp_dir().join(format!("choropleth-cli-bad-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let boundary = dir.join("broken.geojson");
        std::fs::write(&boundary, r#"{"type":"FeatureCollection","features":["#).unwrap();
        let output = dir.join("out.geojson");

        let mut args = render_args(boundary, Some(fixture("regions.tsv")));
        args.output = Some(output.clone());

        let report = cmd_render(&args).unwrap();
        assert_eq!(report.status, RenderStatus::Failed);
        assert!(report.error.is_some());
        assert_eq!(exit_code(&report), 1);
        assert!(!output.exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_render_missing_boundary_file() {
        let args = render_args(PathBuf::from("/nonexistent/regions.geojson"), None);
        assert!(cmd_render(&args).is_err());
    }

    #[test]
    fn test_scale_endpoints() {
        let endpoints = scale_endpoints().unwrap();
        assert_eq!(endpoints.len(), ScaleName::ALL.len());
        let blues = endpoints.iter().find(|(n, _, _)| *n == ScaleName::Blues).unwrap();
        assert_eq!(blues.1, "#f7fbff");
        assert_eq!(blues.2, "#08306b");
    }

    #[test]
    fn test_is_geojson_path() {
        assert!(is_geojson_path(Path::new("out.geojson")));
        assert!(is_geojson_path(Path::new("out.JSON")));
        assert!(!is_geojson_path(Path::new("out.tsv")));
    }
}
