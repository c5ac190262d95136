//! Tests d'intégration du viewer sur les fixtures du crate choropleth

use std::path::{Path, PathBuf};

use choropleth::ScaleName;
use choropleth_viewer::input::{self, DEFAULT_ENCODING};
use choropleth_viewer::{
    bounds, FallbackPolicy, RenderReport, RenderStatus, StyleConfig, Viewer, ViewerConfig,
};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../choropleth/tests/fixtures")
}

fn read(name: &str) -> String {
    let encoding = input::resolve_encoding(DEFAULT_ENCODING).unwrap();
    input::read_text(&fixtures_dir().join(name), encoding).unwrap()
}

#[test]
fn test_every_fixture_renders() {
    let pattern = fixtures_dir().join("*.geojson");
    let paths: Vec<_> = glob::glob(pattern.to_str().unwrap())
        .unwrap()
        .filter_map(|e| e.ok())
        .collect();
    assert!(!paths.is_empty(), "Should find fixtures");

    for path in &paths {
        let mut viewer = Viewer::default();
        let name = path.file_name().unwrap().to_str().unwrap();
        viewer.set_boundary(read(name));

        let frame = viewer.frame();
        assert_eq!(frame.generation, 1, "{}", name);
        let document = frame.document.as_ref().expect("document rendered");
        assert!(bounds(document).is_some(), "{}", name);
    }
}

#[test]
fn test_interactive_session() {
    let mut viewer = Viewer::default();
    viewer.set_boundary(read("regions.geojson"));
    viewer.set_table(read("regions.tsv"));

    let first = viewer.frame().clone();
    let bretagne = first.document.as_ref().unwrap().features()[0].color().map(str::to_string);
    assert!(bretagne.is_some());

    // Changement d'échelle: nouvelle génération, nouvelles couleurs
    viewer.set_scale(ScaleName::Turbo);
    assert!(viewer.frame().generation > first.generation);
    let turbo = viewer.frame().document.as_ref().unwrap().features()[0].color().map(str::to_string);
    assert_ne!(turbo, bretagne);

    // Retour à l'échelle initiale: même document qu'au départ
    viewer.set_scale(ScaleName::Viridis);
    assert_eq!(viewer.frame().document, first.document);

    let report = RenderReport::from_viewer(&viewer);
    assert_eq!(report.status, RenderStatus::Rendered);
    assert_eq!(report.table_entries, 5);
    assert_eq!(report.table_invalid, 1);
    assert_eq!(report.domain, Some([3.3, 99.0]));
}

#[test]
fn test_editing_boundary_with_keep_last() {
    let config = ViewerConfig {
        fallback: FallbackPolicy::KeepLast,
        ..Default::default()
    };
    let mut viewer = Viewer::new(&config);
    let boundary = read("communes.geojson");
    viewer.set_table(read("communes.csv"));
    viewer.set_boundary(boundary.clone());
    let generation = viewer.frame().generation;

    // Saisie en cours: document tronqué
    viewer.set_boundary(&boundary[..boundary.len() / 2]);
    assert_eq!(viewer.frame().generation, generation);
    assert!(viewer.frame().document.is_some());
    assert_eq!(RenderReport::from_viewer(&viewer).status, RenderStatus::Failed);

    viewer.set_boundary(boundary);
    assert!(viewer.last_error().is_none());
    assert_eq!(RenderReport::from_viewer(&viewer).status, RenderStatus::Rendered);
}

#[test]
fn test_print_preset_style() {
    let config = ViewerConfig::from_preset("print").unwrap();
    let mut viewer = Viewer::new(&config);
    viewer.set_boundary(read("regions.geojson"));
    viewer.set_table(read("regions.tsv"));

    let document = viewer.frame().document.clone().unwrap();
    let styles = choropleth_viewer::style::styles(&document, &config.style);
    assert_eq!(styles.len(), document.features().len());
    for (style, feature) in styles.iter().zip(document.features()) {
        assert_eq!(style.fill.as_deref(), feature.color());
    }
    assert_ne!(config.style, StyleConfig::default());
}

#[test]
fn test_legacy_encoded_table() {
    let dir = std::env::temp_dir().join(format!("choropleth-viewer-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("latin1.csv");
    std::fs::write(&path, b"Orl\xE9ans,12\n").unwrap();

    let encoding = input::resolve_encoding(DEFAULT_ENCODING).unwrap();
    let text = input::read_text(&path, encoding).unwrap();

    let mut viewer = Viewer::default();
    viewer.set_boundary(
        r#"{"type":"FeatureCollection","features":[{"type":"Feature","properties":{"name":"Orléans"},"geometry":null}]}"#,
    );
    viewer.set_table(text);
    let document = viewer.frame().document.clone().unwrap();
    assert!(document.features()[0].color().is_some());

    std::fs::remove_dir_all(&dir).ok();
}
