//! Configuration du viewer

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use choropleth::{Delimiter, ScaleName, ScaleSelection};

use crate::state::FallbackPolicy;

/// Configuration principale
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ViewerConfig {
    /// Échelle de couleurs initiale
    #[serde(default)]
    pub scale: ScaleName,

    /// Inverser l'échelle
    #[serde(default)]
    pub inverted: bool,

    /// Séparateur du texte tabulaire
    #[serde(default)]
    pub delimiter: Delimiter,

    /// Comportement quand le document de limites est illisible
    #[serde(default)]
    pub fallback: FallbackPolicy,

    /// Style de rendu
    #[serde(default)]
    pub style: StyleConfig,
}

/// Style de rendu des features
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StyleConfig {
    /// Contour des features sans couleur
    #[serde(default = "default_stroke")]
    pub default_stroke: String,

    /// Épaisseur du contour
    #[serde(default = "default_stroke_weight")]
    pub stroke_weight: f64,

    /// Opacité du remplissage
    #[serde(default = "default_fill_opacity")]
    pub fill_opacity: f64,
}

fn default_stroke() -> String {
    "#3388ff".to_string()
}

fn default_stroke_weight() -> f64 {
    1.0
}

fn default_fill_opacity() -> f64 {
    0.7
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            default_stroke: default_stroke(),
            stroke_weight: default_stroke_weight(),
            fill_opacity: default_fill_opacity(),
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            scale: ScaleName::default(),
            inverted: false,
            delimiter: Delimiter::default(),
            fallback: FallbackPolicy::default(),
            style: StyleConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Charge une configuration depuis un fichier
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content).context("Failed to parse config JSON")
    }

    /// Charge une configuration depuis un preset embarqué
    pub fn from_preset(preset: &str) -> Result<Self> {
        match preset {
            "default" => Self::load_embedded(include_str!("presets/default.json")),
            "print" => Self::load_embedded(include_str!("presets/print.json")),
            "dark" => Self::load_embedded(include_str!("presets/dark.json")),
            _ => anyhow::bail!("Unknown preset: {}. Use: default, print, dark", preset),
        }
    }

    /// Nom de preset ou chemin vers un fichier JSON
    pub fn from_spec(spec: &str) -> Result<Self> {
        let path = Path::new(spec);
        if path.extension().is_some_and(|ext| ext == "json") || path.exists() {
            Self::load(path)
        } else {
            Self::from_preset(spec)
        }
    }

    fn load_embedded(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse embedded config")
    }

    /// Applique les surcharges d'environnement (CHOROPLETH_SCALE, CHOROPLETH_INVERT)
    pub fn apply_env(&mut self) {
        if let Some(scale) = std::env::var("CHOROPLETH_SCALE")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            self.scale = scale;
        }
        if let Some(inverted) = std::env::var("CHOROPLETH_INVERT")
            .ok()
            .and_then(|s| parse_bool(&s))
        {
            self.inverted = inverted;
        }
    }

    pub fn selection(&self) -> ScaleSelection {
        ScaleSelection::new(self.scale, self.inverted)
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
