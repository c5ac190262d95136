//! Lecture des fichiers d'entrée
//!
//! Les fichiers sont lus en octets. Un contenu UTF-8 valide est utilisé tel quel
//! (validation SIMD via `simdutf8`) ; sinon il est décodé avec l'encodage hérité
//! configuré (`windows-1252` par défaut, courant pour les exports de tableurs).

use std::path::Path;

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use tracing::debug;

/// Encodage de repli par défaut
pub const DEFAULT_ENCODING: &str = "windows-1252";

/// Résout un label d'encodage WHATWG (`latin1`, `iso-8859-15`, `utf-16le`...)
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| anyhow::anyhow!("Unknown encoding label: {}", label))
}

/// Lit un fichier texte, avec décodage de repli si ce n'est pas de l'UTF-8
pub fn read_text(path: &Path, fallback: &'static Encoding) -> Result<String> {
    let data =
        std::fs::read(path).context(format!("Failed to read input file: {}", path.display()))?;
    let text = decode(&data, fallback);
    debug!(
        path = %path.display(),
        bytes = data.len(),
        chars = text.len(),
        "Input file loaded"
    );
    Ok(text)
}

/// Décode des octets en texte, BOM UTF-8 retiré
pub fn decode(data: &[u8], fallback: &'static Encoding) -> String {
    let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);

    match simdutf8::basic::from_utf8(data) {
        Ok(text) => text.to_string(),
        Err(_) => {
            debug!(encoding = fallback.name(), "Input is not UTF-8, decoding");
            let (decoded, _, _) = fallback.decode(data);
            decoded.into_owned()
        }
    }
}
