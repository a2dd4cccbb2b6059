//! Pull-based row source for the bulk copy
//!
//! The copy driver owns the pacing: it calls [`CopyFromSource::advance`],
//! takes the row with [`CopyFromSource::current`], and checks
//! [`CopyFromSource::err`] once the source reports no more rows.

use tracing::trace;

use super::error::CopySourceError;
use super::models::CatalogRow;

/// Cursor contract consumed by [`super::storage::CatalogStore::copy_from`]
pub trait CopyFromSource {
    /// Move to the next row. Returns false once the source is exhausted.
    fn advance(&mut self) -> bool;

    /// Take the row at the current position.
    fn current(&mut self) -> Result<CatalogRow, CopySourceError>;

    /// Terminal error that must abort the enclosing copy, if any
    fn err(&self) -> Option<&CopySourceError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CursorState {
    Unstarted,
    Positioned(usize),
    Exhausted,
}

impl CursorState {
    fn describe(self) -> &'static str {
        match self {
            CursorState::Unstarted => "before the first row",
            CursorState::Positioned(_) => "positioned",
            CursorState::Exhausted => "exhausted",
        }
    }
}

/// Cursor over projected catalog rows.
///
/// One index drives advancing, exhaustion and numbering: the row at position
/// `n` is the `n`-th projected row and gets row identifier `n`. Rows are
/// moved out as they are yielded; the source never holds a row it already
/// handed downstream.
#[derive(Debug)]
pub struct LanguageCopySource {
    rows: std::vec::IntoIter<CatalogRow>,
    state: CursorState,
    slot: Option<CatalogRow>,
    error: Option<CopySourceError>,
}

impl LanguageCopySource {
    pub fn new(rows: Vec<CatalogRow>) -> Self {
        Self {
            rows: rows.into_iter(),
            state: CursorState::Unstarted,
            slot: None,
            error: None,
        }
    }

    fn fail(&mut self, error: CopySourceError) -> CopySourceError {
        self.error = Some(error.clone());
        error
    }
}

/// Row identifier for a cursor position
pub fn row_identifier(index: usize) -> Result<i32, CopySourceError> {
    i32::try_from(index).map_err(|_| CopySourceError::IdentifierOverflow { index })
}

impl CopyFromSource for LanguageCopySource {
    fn advance(&mut self) -> bool {
        let next = match self.state {
            CursorState::Unstarted => 0,
            CursorState::Positioned(index) => index + 1,
            CursorState::Exhausted => return false,
        };

        match self.rows.next() {
            Some(row) => {
                self.slot = Some(row);
                self.state = CursorState::Positioned(next);
                true
            }
            None => {
                self.slot = None;
                self.state = CursorState::Exhausted;
                false
            }
        }
    }

    fn current(&mut self) -> Result<CatalogRow, CopySourceError> {
        let index = match self.state {
            CursorState::Positioned(index) => index,
            state => {
                return Err(self.fail(CopySourceError::InvalidPosition {
                    state: state.describe(),
                }))
            }
        };

        let id = match row_identifier(index) {
            Ok(id) => id,
            Err(error) => return Err(self.fail(error)),
        };

        let Some(mut row) = self.slot.take() else {
            return Err(self.fail(CopySourceError::AlreadyTaken { index }));
        };
        row.id = id;

        trace!(
            id = row.id,
            name = %row.name,
            language_id = row.language_id,
            category = ?row.category.as_option(),
            "Yielding language row"
        );
        Ok(row)
    }

    fn err(&self) -> Option<&CopySourceError> {
        self.error.as_ref()
    }
}
