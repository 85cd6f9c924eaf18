use thiserror::Error;

/// Why a key could not be converted to the trie's fixed width.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum KeyError {
    /// Signed input below zero.
    #[error("negative values cannot be stored")]
    Negative,
    /// The value needs more bits than the trie's width.
    #[error("value needs {bits} bits but the trie holds {width}")]
    TooWide { bits: u32, width: u32 },
    /// A byte key with no bytes.
    #[error("byte key is empty")]
    EmptyBytes,
    /// A byte key longer than the trie's width allows.
    #[error("byte key has {len} bytes, at most {max} allowed")]
    TooManyBytes { len: usize, max: usize },
}

/// Errors returned by [crate::XFastTrie].
///
/// Every error is raised before the trie is touched, so a failed call never
/// leaves a partially applied change behind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid key: {0}")]
    InvalidKey(#[from] KeyError),

    #[error("invalid width {0}: must be between 1 and {max}", max = crate::MAX_WIDTH)]
    InvalidWidth(u32),

    #[error("no values exist in trie")]
    EmptyTrie,

    #[error("value {0} does not exist in trie")]
    KeyNotFound(u64),
}

pub type Result<T> = std::result::Result<T, Error>;
