//! Export du document enrichi vers GeoJSON

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use choropleth::EnrichedDocument;

use crate::config::StyleConfig;
use crate::style;

/// Écrit le document enrichi, avec les propriétés simplestyle si `style` est fourni
pub fn write_geojson<W: Write>(
    mut writer: W,
    document: &EnrichedDocument,
    style: Option<&StyleConfig>,
) -> Result<()> {
    match style {
        Some(config) => {
            let json = style::to_styled_json(document, config);
            serde_json::to_writer_pretty(&mut writer, &json)?;
        }
        None => document.write_to(&mut writer, true)?,
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Exporte le document enrichi dans un fichier
pub fn export_to_geojson(
    document: &EnrichedDocument,
    style: Option<&StyleConfig>,
    output_path: &Path,
) -> Result<()> {
    let file = File::create(output_path)
        .context(format!("Failed to create file: {}", output_path.display()))?;
    write_geojson(BufWriter::new(file), document, style)
}
