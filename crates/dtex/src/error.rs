/// Errors that can occur while loading textures and palettes.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// I/O error reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file does not start with the expected four-byte tag.
    #[error("bad magic: expected {expected:?}, found {found:?}")]
    BadMagic { expected: [u8; 4], found: [u8; 4] },

    /// The file ends before the data its header announces.
    #[error("truncated {what}: need {needed} bytes, have {available}")]
    Truncated {
        what: &'static str,
        needed: usize,
        available: usize,
    },

    /// The file holds more payload than its header declares.
    #[error("size mismatch: header declares {declared} payload bytes, file has {actual}")]
    SizeMismatch { declared: usize, actual: usize },

    /// The palette does not fit the bank it was assigned.
    #[error("palette error: {0}")]
    Palette(String),
}
