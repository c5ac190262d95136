//! Parser pour le texte tabulaire (valeurs séparées par tabulation ou virgule)
//!
//! Chaque ligne non vide est une ligne de données : aucun en-tête n'est consommé.
//! Les champs entre guillemets doubles peuvent contenir le séparateur, un saut de
//! ligne ou un guillemet doublé (`""`). La lecture est confiée au crate `csv`.

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::types::Delimiter;

const BOM: char = '\u{feff}';

/// Parse un texte délimité en lignes de champs
///
/// Les lignes de longueurs différentes sont conservées telles quelles ; une
/// ligne illisible est ignorée sans interrompre la lecture.
pub fn parse(text: &str, delimiter: Delimiter) -> Vec<Vec<String>> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let sep = delimiter.resolve(text);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(sep)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        match record {
            Ok(record) if !is_blank(&record) => {
                rows.push(record.iter().map(str::to_string).collect());
            }
            Ok(_) => {}
            Err(e) => debug!(row = index, error = %e, "Unreadable row skipped"),
        }
    }
    rows
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(str::is_empty)
}
