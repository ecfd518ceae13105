/// An error encountered while loading sections or exporting audio
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An error reading or writing a file
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// An error encoding a WAV stream
    #[cfg(feature = "wav")]
    #[cfg_attr(docsrs, doc(cfg(feature = "wav")))]
    #[error("{0}")]
    Wave(#[from] hound::Error),
    /// An error parsing section JSON
    #[cfg(feature = "json")]
    #[cfg_attr(docsrs, doc(cfg(feature = "json")))]
    #[error("invalid sections: {0}")]
    Json(#[from] serde_json::Error),
    /// Every section was rejected or none were given
    #[error("no playable sections")]
    NoSections,
}

/// A result type for this crate's fallible operations
pub type Result<T, E = Error> = std::result::Result<T, E>;
