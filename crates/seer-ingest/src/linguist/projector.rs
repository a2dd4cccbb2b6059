//! Projection of catalog definitions onto storage rows

use serde::{Deserialize, Serialize};

use super::error::ProjectionError;
use super::models::{CatalogRow, LanguageDefinition, LanguageType, Nullable};

/// Compatibility switches for quirks of earlier loads.
///
/// Tables populated by earlier versions of the loader store every
/// `programming` language with type `data`, and a copy of `filenames` in
/// `interpreters`. Both shims are on by default so a fresh load matches data
/// already persisted elsewhere; turn them off to store the catalog as
/// published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionOptions {
    /// Store `programming` as [`LanguageType::Data`]
    pub legacy_programming_category: bool,
    /// Fill `interpreters` from the definition's `filenames`
    pub legacy_interpreters: bool,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            legacy_programming_category: true,
            legacy_interpreters: true,
        }
    }
}

impl ProjectionOptions {
    /// Store categories and interpreters exactly as the catalog publishes them
    pub fn catalog_faithful() -> Self {
        Self {
            legacy_programming_category: false,
            legacy_interpreters: false,
        }
    }

    /// Map a catalog `type` onto the storage enumeration.
    ///
    /// Empty means "no category". Anything outside the four known values is
    /// rejected rather than silently stored as the zero member.
    fn category(
        &self,
        language: &str,
        category: String,
    ) -> Result<Nullable<LanguageType>, ProjectionError> {
        let language_type = match category.as_str() {
            "" => return Ok(Nullable::absent()),
            "data" => LanguageType::Data,
            "programming" if self.legacy_programming_category => LanguageType::Data,
            "programming" => LanguageType::Programming,
            "markup" => LanguageType::Markup,
            "prose" => LanguageType::Prose,
            _ => {
                return Err(ProjectionError::UnknownCategory {
                    language: language.to_string(),
                    category,
                })
            }
        };
        Ok(Nullable::present(language_type))
    }
}

/// Convert one definition into a storage row.
///
/// Every optional string becomes absent when empty and present otherwise;
/// `wrap` is always present. The row identifier is left at zero, it is
/// assigned when the row is streamed.
pub fn project(
    definition: LanguageDefinition,
    options: &ProjectionOptions,
) -> Result<CatalogRow, ProjectionError> {
    let category = options.category(&definition.name, definition.category)?;
    let interpreters = if options.legacy_interpreters {
        definition.filenames.clone()
    } else {
        definition.interpreters
    };

    Ok(CatalogRow {
        id: 0,
        name: definition.name,
        fs_name: Nullable::non_empty(definition.fs_name),
        category,
        aliases: definition.aliases,
        ace_mode: Nullable::non_empty(definition.ace_mode),
        codemirror_mode: Nullable::non_empty(definition.codemirror_mode),
        codemirror_mime_type: Nullable::non_empty(definition.codemirror_mime_type),
        wrap: Nullable::present(definition.wrap),
        extensions: definition.extensions,
        filenames: definition.filenames,
        interpreters,
        language_id: definition.language_id,
        color: Nullable::non_empty(definition.color),
        tm_scope: Nullable::non_empty(definition.tm_scope),
        group: Nullable::non_empty(definition.group),
    })
}

/// Project a whole catalog, keeping its order. Stops at the first rejected definition.
pub fn project_all(
    definitions: Vec<LanguageDefinition>,
    options: &ProjectionOptions,
) -> Result<Vec<CatalogRow>, ProjectionError> {
    definitions
        .into_iter()
        .map(|definition| project(definition, options))
        .collect()
}
