use thiserror::Error;

use crate::tree::ItemId;

/// Errors surfaced by the layout engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("rect buffer is full (capacity {capacity})")]
    RectBufferFull { capacity: usize },
}

/// Errors surfaced by the binary model codec.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    #[error("buffer truncated: need {needed} bytes, have {actual}")]
    Truncated { needed: usize, actual: usize },
    #[error("bad magic {0:?}")]
    BadMagic([u8; 4]),
    #[error("unsupported format version {0}")]
    UnsupportedVersion(u8),
    #[error("non-zero header padding {0:?}")]
    BadPadding([u8; 3]),
    #[error("{record} record is {actual} bytes, expected {expected}")]
    RecordSize {
        record: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("{block} block is {actual} bytes, expected {expected}")]
    BlockSize {
        block: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("output buffer too small: need {required} bytes, capacity {capacity}")]
    BufferTooSmall { required: usize, capacity: usize },
    #[error("item {id:?} carries {actual} bytes of user data, model declares {expected}")]
    UserDataSize {
        id: ItemId,
        expected: usize,
        actual: usize,
    },
    #[error("{block} block of {size} bytes does not fit the format")]
    TooLarge { block: &'static str, size: usize },
}
