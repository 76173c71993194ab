use media_catalog_models::{MediaItem, MediaKey, MediaType};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Most titles that can be compared at once
pub const MAX_SELECTED: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompareState {
    Empty,
    OneSelected,
    TwoSelected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RejectReason {
    /// The selection is locked to another media type
    TypeMismatch { locked: MediaType, offered: MediaType },
    SelectionFull,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ToggleOutcome {
    Selected,
    Deselected,
    Rejected(RejectReason),
}

impl ToggleOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, ToggleOutcome::Rejected(_))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompareError {
    #[error("Select two titles to compare ({selected} selected)")]
    NotEnoughSelected { selected: usize },

    #[error("Please select items of the same type to compare")]
    TypeMismatch,
}

/// Where a confirmed selection leads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompareTarget {
    pub media_type: MediaType,
    pub left_id: u64,
    pub right_id: u64,
}

impl CompareTarget {
    pub fn route(&self) -> String {
        let prefix = match self.media_type {
            MediaType::Movie => "compare-movies",
            MediaType::Tv => "compare-tvs",
        };
        format!("/{}/{}/{}", prefix, self.left_id, self.right_id)
    }
}

/// Titles picked for comparison, in pick order.
///
/// The first pick locks the compare type; the lock is released when the
/// selection empties again. Every card flag (selected, dimmed, confirm
/// button visible) is derived from this state alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompareSelection {
    selected: Vec<MediaItem>,
    compare_type: Option<MediaType>,
}

impl CompareSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CompareState {
        match self.selected.len() {
            0 => CompareState::Empty,
            1 => CompareState::OneSelected,
            _ => CompareState::TwoSelected,
        }
    }

    pub fn compare_type(&self) -> Option<MediaType> {
        self.compare_type
    }

    pub fn selected(&self) -> &[MediaItem] {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn toggle(&mut self, item: &MediaItem) -> ToggleOutcome {
        let key = item.key();

        if let Some(pos) = self.selected.iter().position(|s| s.key() == key) {
            self.selected.remove(pos);
            if self.selected.is_empty() {
                self.compare_type = None;
            }
            debug!(%key, remaining = self.selected.len(), "Deselected for comparison");
            return ToggleOutcome::Deselected;
        }

        if let Some(locked) = self.compare_type {
            if locked != item.media_type() {
                debug!(%key, %locked, "Rejected: compare type is locked");
                return ToggleOutcome::Rejected(RejectReason::TypeMismatch {
                    locked,
                    offered: item.media_type(),
                });
            }
        }
        if self.selected.len() >= MAX_SELECTED {
            debug!(%key, "Rejected: selection full");
            return ToggleOutcome::Rejected(RejectReason::SelectionFull);
        }

        self.compare_type = Some(item.media_type());
        self.selected.push(item.clone());
        debug!(%key, selected = self.selected.len(), "Selected for comparison");
        ToggleOutcome::Selected
    }

    pub fn confirm(&self) -> Result<CompareTarget, CompareError> {
        let [left, right] = self.selected.as_slice() else {
            return Err(CompareError::NotEnoughSelected {
                selected: self.selected.len(),
            });
        };
        if left.media_type() != right.media_type() {
            return Err(CompareError::TypeMismatch);
        }
        Ok(CompareTarget {
            media_type: left.media_type(),
            left_id: left.id(),
            right_id: right.id(),
        })
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.compare_type = None;
    }

    pub fn is_selected(&self, key: &MediaKey) -> bool {
        self.selected.iter().any(|s| s.key() == *key)
    }

    /// Cards that cannot be added right now are dimmed
    pub fn is_dimmed(&self, item: &MediaItem) -> bool {
        let wrong_type = self.compare_type.is_some_and(|t| t != item.media_type());
        let full = self.selected.len() >= MAX_SELECTED && !self.is_selected(&item.key());
        wrong_type || full
    }

    pub fn can_confirm(&self) -> bool {
        self.state() == CompareState::TwoSelected
    }

    /// Opening a detail view is disabled while picking titles
    pub fn allows_navigation(&self) -> bool {
        self.selected.is_empty()
    }
}
