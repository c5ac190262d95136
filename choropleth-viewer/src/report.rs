//! Rapport de rendu
//!
//! Ce module résume l'état du viewer après un rendu : statut, jointure,
//! domaine, légende et erreur éventuelle, pour affichage console ou export JSON.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

use choropleth::{ColorScale, EnrichedDocument, EnrichmentStats};

use crate::state::Viewer;
use crate::style;

/// Nombre d'échantillons de la légende
const LEGEND_STEPS: usize = 5;

/// Statut global du rendu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RenderStatus {
    /// Document rendu
    Rendered,
    /// Rien à afficher (limites vides)
    Empty,
    /// Document de limites illisible
    Failed,
}

/// Échantillon de légende
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub value: f64,
    pub color: String,
}

/// Rapport complet d'un rendu
#[derive(Debug, Clone, Serialize)]
pub struct RenderReport {
    /// Génération du frame rendu
    pub generation: u64,
    /// Durée du rendu
    pub duration_secs: f64,
    /// Statut global
    pub status: RenderStatus,

    // Sélection
    pub scale: String,
    pub inverted: bool,
    pub delimiter: String,

    // Table jointe au document affiché
    /// Nombre de clés dans la table
    pub table_entries: usize,
    /// Nombre de clés à valeur invalide
    pub table_invalid: usize,
    /// Domaine [min, max] des valeurs numériques
    pub domain: Option<[f64; 2]>,

    /// Compteurs de jointure
    pub stats: EnrichmentStats,
    /// Emprise [min_x, min_y, max_x, max_y]
    pub bounds: Option<[f64; 4]>,
    /// Échantillons de la légende
    pub legend: Vec<LegendEntry>,

    /// Dernière erreur de parsing
    pub error: Option<String>,
}

impl RenderReport {
    /// Résume l'état courant du viewer
    pub fn from_viewer(viewer: &Viewer) -> Self {
        let inputs = viewer.inputs();
        let frame = viewer.frame();

        let document = frame.document.as_deref();

        // Table et domaine tels que joints au document affiché
        let join = document
            .and_then(EnrichedDocument::join_summary)
            .unwrap_or_default();
        let legend = ColorScale::new(inputs.selection, join.domain)
            .map(|scale| {
                scale
                    .legend(LEGEND_STEPS)
                    .into_iter()
                    .map(|(value, color)| LegendEntry { value, color })
                    .collect()
            })
            .unwrap_or_default();

        let status = match (viewer.last_error(), document) {
            (Some(_), _) => RenderStatus::Failed,
            (None, Some(_)) => RenderStatus::Rendered,
            (None, None) => RenderStatus::Empty,
        };

        Self {
            generation: frame.generation,
            duration_secs: 0.0,
            status,
            scale: inputs.selection.name.to_string(),
            inverted: inputs.selection.inverted,
            delimiter: inputs.delimiter.to_string(),
            table_entries: join.entries,
            table_invalid: join.invalid,
            domain: join.domain.map(|d| [d.min, d.max]),
            stats: document.map(|d| d.stats()).unwrap_or_default(),
            bounds: document.and_then(style::bounds).map(|r| {
                [r.min().x, r.min().y, r.max().x, r.max().y]
            }),
            legend,
            error: viewer.last_error().map(str::to_string),
        }
    }

    /// Définit la durée du rendu
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_secs = duration.as_secs_f64();
    }

    /// Affiche le rapport sur la console
    pub fn display(&self) {
        println!("\n{}", "=".repeat(60));
        println!("RENDER REPORT - Generation {}", self.generation);
        println!("{}", "=".repeat(60));

        println!("\nStatus: {:?}", self.status);
        println!("Duration: {:.3}s", self.duration_secs);
        println!(
            "Scale: {}{}",
            self.scale,
            if self.inverted { " (inverted)" } else { "" }
        );

        println!("\n--- TABLE ---");
        println!(
            "Entries: {} ({} invalid), delimiter: {}",
            self.table_entries, self.table_invalid, self.delimiter
        );
        match self.domain {
            Some([min, max]) => println!("Domain: [{}, {}]", min, max),
            None => println!("Domain: none"),
        }

        println!("\n--- FEATURES ---");
        println!(
            "Features: {} matched, {} invalid, {} unmatched (total {})",
            self.stats.matched, self.stats.invalid, self.stats.unmatched, self.stats.features
        );
        if let Some([min_x, min_y, max_x, max_y]) = self.bounds {
            println!("Bounds: [{}, {}] - [{}, {}]", min_x, min_y, max_x, max_y);
        }

        if !self.legend.is_empty() {
            println!("\n--- LEGEND ---");
            for entry in &self.legend {
                println!("  {:>12}  {}", format_value(entry.value), entry.color);
            }
        }

        if let Some(error) = &self.error {
            println!("\n--- ERROR ---");
            println!("  {}", error);
        }

        println!("\n{}", "=".repeat(60));
    }

    /// Sauvegarde le rapport en JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Affichage compact pour le résumé
    pub fn summary(&self) -> String {
        format!(
            "generation {}: {:?}, {} matched, {} invalid, {} unmatched",
            self.generation,
            self.status,
            self.stats.matched,
            self.stats.invalid,
            self.stats.unmatched
        )
    }
}

fn format_value(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{:.3}", v)
    }
}
