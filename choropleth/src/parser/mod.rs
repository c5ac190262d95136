//! Parsers des deux entrées texte (table de valeurs, document de limites)

pub mod boundary;
pub mod tabular;
