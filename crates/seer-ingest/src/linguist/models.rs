//! Catalog entry and storage row types

use serde::{Deserialize, Deserializer};

/// Target table for the catalog load
pub const LANGUAGE_TABLE: &str = "languages";

/// Column order of the bulk copy. This is the wire contract with `COPY`; every
/// encoded row must emit its fields in exactly this order.
pub const LANGUAGE_COLUMNS: [&str; 16] = [
    "id",
    "name",
    "fs_name",
    "type",
    "aliases",
    "ace_mode",
    "codemirror_mode",
    "codemirror_mime_type",
    "wrap",
    "extensions",
    "filenames",
    "interpreters",
    "language_id",
    "color",
    "tm_scope",
    "group",
];

/// One entry of Linguist's `languages.yml`, keyed by language name.
///
/// Scalar fields that the document may leave out (or set to `~`) decode to
/// their empty value; list fields keep "absent" apart from "empty".
/// `language_id` is the only required field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LanguageDefinition {
    /// Canonical name. Always replaced by the mapping key after decoding.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Replacement for the samples directory name when `name` is not a valid filename
    #[serde(default, deserialize_with = "null_as_default")]
    pub fs_name: String,

    /// data, programming, markup, prose, or empty
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub category: String,

    #[serde(default)]
    pub aliases: Option<Vec<String>>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub ace_mode: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub codemirror_mode: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub codemirror_mime_type: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub wrap: bool,

    /// First entry is the primary extension
    #[serde(default)]
    pub extensions: Option<Vec<String>>,

    #[serde(default)]
    pub filenames: Option<Vec<String>>,

    #[serde(default)]
    pub interpreters: Option<Vec<String>>,

    /// Upstream identifier that survives renames of the language
    pub language_id: i32,

    #[serde(default, deserialize_with = "null_as_default")]
    pub color: String,

    /// TextMate scope, "none" when there is no grammar
    #[serde(default, deserialize_with = "null_as_default")]
    pub tm_scope: String,

    /// Parent language this one is counted as
    #[serde(default, deserialize_with = "null_as_default")]
    pub group: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Storage enumeration behind the `language_type` column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(type_name = "language_type", rename_all = "lowercase")]
pub enum LanguageType {
    #[default]
    Data,
    Programming,
    Markup,
    Prose,
}

impl LanguageType {
    pub fn as_str(self) -> &'static str {
        match self {
            LanguageType::Data => "data",
            LanguageType::Programming => "programming",
            LanguageType::Markup => "markup",
            LanguageType::Prose => "prose",
        }
    }
}

impl std::fmt::Display for LanguageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value paired with an explicit presence flag.
///
/// Absent values still carry a backing value (the type's default) so a row
/// can be inspected without unwrapping, but they are written as SQL `NULL`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Nullable<T> {
    pub value: T,
    pub present: bool,
}

impl<T> Nullable<T> {
    pub fn present(value: T) -> Self {
        Self {
            value,
            present: true,
        }
    }

    pub fn as_option(&self) -> Option<&T> {
        self.present.then_some(&self.value)
    }
}

impl<T: Default> Nullable<T> {
    pub fn absent() -> Self {
        Self {
            value: T::default(),
            present: false,
        }
    }
}

impl Nullable<String> {
    /// Empty strings mean "no value"
    pub fn non_empty(value: String) -> Self {
        if value.is_empty() {
            Self::absent()
        } else {
            Self::present(value)
        }
    }
}

/// Storage-ready projection of a [`LanguageDefinition`].
///
/// `id` is the row identifier assigned by the bulk-copy cursor; it is zero
/// until the row is yielded from a [`super::copy_source::LanguageCopySource`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogRow {
    pub id: i32,
    pub name: String,
    pub fs_name: Nullable<String>,
    pub category: Nullable<LanguageType>,
    pub aliases: Option<Vec<String>>,
    pub ace_mode: Nullable<String>,
    pub codemirror_mode: Nullable<String>,
    pub codemirror_mime_type: Nullable<String>,
    pub wrap: Nullable<bool>,
    pub extensions: Option<Vec<String>>,
    pub filenames: Option<Vec<String>>,
    pub interpreters: Option<Vec<String>>,
    pub language_id: i32,
    pub color: Nullable<String>,
    pub tm_scope: Nullable<String>,
    pub group: Nullable<String>,
}
