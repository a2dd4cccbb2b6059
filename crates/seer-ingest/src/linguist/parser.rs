//! Decoding of `languages.yml`
//!
//! The document is decoded in two passes: first into a generic mapping of
//! language name to untyped YAML value, then each value is re-encoded and
//! decoded into [`LanguageDefinition`]. Fields the definition does not know
//! about are dropped in the second pass, so upstream can add fields without
//! breaking the load. Re-encoding turns the first pass's typed scalars back
//! into plain text, so `2` or `true` still decode into string fields.

use serde_yaml::Value;
use std::collections::BTreeMap;
use tracing::debug;

use super::error::ParseError;
use super::models::LanguageDefinition;

/// Parse a catalog document into definitions.
///
/// Entries are returned sorted by canonical name (byte order), which makes
/// the row identifiers assigned later reproducible between loads. The first
/// entry that fails to decode aborts the whole parse. An empty or null
/// document is an empty catalog.
pub fn parse_catalog(document: &[u8]) -> Result<Vec<LanguageDefinition>, ParseError> {
    let catalog: BTreeMap<String, Value> =
        serde_yaml::from_slice::<Option<BTreeMap<String, Value>>>(document)
            .map_err(ParseError::Document)?
            .unwrap_or_default();

    let mut definitions = Vec::with_capacity(catalog.len());
    for (key, value) in catalog {
        definitions.push(decode_entry(key, value)?);
    }

    debug!(entries = definitions.len(), "Parsed language catalog");
    Ok(definitions)
}

fn decode_entry(key: String, value: Value) -> Result<LanguageDefinition, ParseError> {
    let decoded = serde_yaml::to_string(&value)
        .and_then(|text| serde_yaml::from_str::<LanguageDefinition>(&text));
    let mut definition = match decoded {
        Ok(definition) => definition,
        Err(source) => return Err(ParseError::Entry { key, source }),
    };
    definition.name = key;
    Ok(definition)
}
