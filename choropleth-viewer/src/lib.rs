//! # choropleth-viewer
//!
//! État réactif, style et CLI autour du pipeline `choropleth`.
//!
//! ## Features
//!
//! - `Viewer` : entrées brutes, recalcul synchrone, numéro de génération
//! - Cache des recalculs indexé par empreinte blake3 des entrées
//! - Style des features et emprise du document (`geo`)
//! - Rapport de rendu console / JSON
//! - Lecture des fichiers UTF-8 ou encodage hérité (`encoding_rs`)
//!
//! ## Usage CLI
//!
//! ```bash
//! # Rendu vers un fichier GeoJSON
//! choropleth-viewer render --boundary regions.geojson --table regions.tsv --scale magma -o out.geojson
//!
//! # Échelles disponibles
//! choropleth-viewer scales
//! ```

pub mod cli;
pub mod config;
pub mod export;
pub mod input;
pub mod report;
pub mod state;
pub mod style;

pub use config::{StyleConfig, ViewerConfig};
pub use report::{RenderReport, RenderStatus};
pub use state::{FallbackPolicy, Frame, Viewer};
pub use style::{bounds, FeatureStyle};
