//! Top-level error type for crop sessions.

use thiserror::Error;

use crate::config::ConfigError;
use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::export::EncodedIcon;
use crate::icon_store::IconStoreError;

/// Errors surfaced by [`crate::Cropper`] and [`crate::CropSession`].
#[derive(Debug, Error)]
pub enum CropError {
    /// An operation needs an open session and there is none.
    #[error("No crop session is open")]
    NoSession,

    /// The selected file could not be decoded, or resampling failed.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The output icon could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The selection is below the minimum size accepted on confirm.
    #[error("Selection is too small: {size:.1}px (minimum {min:.1}px)")]
    SelectionTooSmall { size: f64, min: f64 },

    /// The icon was produced but the icon store rejected it. The icon is kept
    /// here so the caller can retry the write.
    #[error("Failed to store icon: {source}")]
    StoreWrite {
        icon: EncodedIcon,
        source: IconStoreError,
    },
}

impl CropError {
    /// The produced icon, if this error happened after export.
    pub fn recovered_icon(&self) -> Option<&EncodedIcon> {
        match self {
            CropError::StoreWrite { icon, .. } => Some(icon),
            _ => None,
        }
    }
}
