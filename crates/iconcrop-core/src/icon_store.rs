//! Where the current icon lives between sessions.

use thiserror::Error;

use crate::export::EncodedIcon;

/// Errors raised by an [`IconStore`] write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IconStoreError {
    /// The store accepted the call but failed to persist the icon.
    #[error("Icon write failed: {0}")]
    WriteFailed(String),

    /// The store cannot be reached at all.
    #[error("Icon store unavailable")]
    Unavailable,
}

/// Holds the single current icon.
///
/// `set` is synchronous: once it returns `Ok`, `get` observes the new icon.
pub trait IconStore {
    /// The current icon, if one has been stored.
    fn get(&self) -> Option<EncodedIcon>;

    /// Replace the current icon.
    fn set(&mut self, icon: &EncodedIcon) -> Result<(), IconStoreError>;
}

/// In-process store, used natively and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryIconStore {
    icon: Option<EncodedIcon>,
    writes: usize,
}

impl MemoryIconStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `icon`.
    pub fn with_icon(icon: EncodedIcon) -> Self {
        Self {
            icon: Some(icon),
            writes: 0,
        }
    }

    /// Number of successful `set` calls.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl IconStore for MemoryIconStore {
    fn get(&self) -> Option<EncodedIcon> {
        self.icon.clone()
    }

    fn set(&mut self, icon: &EncodedIcon) -> Result<(), IconStoreError> {
        self.icon = Some(icon.clone());
        self.writes += 1;
        Ok(())
    }
}
