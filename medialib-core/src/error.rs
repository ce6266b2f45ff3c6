use medialib_model::EntityKind;
use thiserror::Error;

use crate::pagination::cipher::CipherError;
use crate::pagination::value::ValueType;

/// A pagination token could not be turned back into a cursor position.
///
/// Every variant is a client-input problem: the token was forged, corrupted,
/// truncated, or minted for a different collection.
#[derive(Error, Debug)]
pub enum TokenDecodeError {
    #[error("pagination token is malformed")]
    Malformed(#[source] CipherError),

    #[error("pagination token is truncated: needed {needed} bytes, found {found}")]
    Truncated { needed: usize, found: usize },

    #[error("pagination token has {0} unexpected trailing bytes")]
    TrailingBytes(usize),

    #[error("unsupported pagination token version {0}")]
    UnsupportedVersion(u8),

    #[error("pagination token was issued for entity {found:#04x}, not {expected}")]
    EntityMismatch { expected: EntityKind, found: u8 },

    #[error("sort field ordinal {ordinal} is not valid for {entity}")]
    UnknownSortField { entity: EntityKind, ordinal: i32 },

    #[error("invalid {field} flag byte {value:#04x}")]
    InvalidFlag { field: &'static str, value: u8 },

    #[error("invalid secondary key {0}")]
    InvalidSecondaryKey(i32),

    #[error("text cursor value is not valid UTF-8")]
    InvalidUtf8,

    #[error("timestamp cursor value {0} is out of range")]
    TimestampOutOfRange(i64),

    #[error("pagination token carries only half of a keyset boundary")]
    PartialBoundary,
}

/// A cursor position could not be written into a token.
///
/// These indicate data the engine refuses to paginate over rather than bad
/// client input, so they surface as server errors.
#[derive(Error, Debug)]
pub enum TokenEncodeError {
    #[error("{value_type} cursor value collides with the reserved no-value sentinel")]
    SentinelCollision { value_type: ValueType },

    #[error("expected a {expected} cursor value, got {found}")]
    TypeMismatch {
        expected: ValueType,
        found: ValueType,
    },

    #[error("timestamp cursor values must be whole seconds")]
    SubsecondTimestamp,

    #[error("secondary key {0} cannot be represented in a pagination token")]
    SecondaryKeyOutOfRange(i32),

    #[error("text cursor value of {len} bytes exceeds the {max} byte limit")]
    TextTooLong { len: usize, max: usize },

    #[error("sealed pagination token of {len} characters exceeds {max}")]
    TooLong { len: usize, max: usize },

    #[error("failed to seal pagination token")]
    Cipher(#[source] CipherError),
}

#[derive(Error, Debug)]
pub enum PaginationError {
    #[error("invalid pagination token: {0}")]
    TokenDecode(#[from] TokenDecodeError),

    #[error("failed to build pagination token: {0}")]
    TokenEncode(#[from] TokenEncodeError),

    #[error("limit {requested} is outside the allowed range 1..={max}")]
    InvalidLimit { requested: u32, max: u32 },

    #[error("sort order {ordinal} is not valid for {entity}")]
    InvalidSortField { entity: EntityKind, ordinal: i32 },

    #[error("query execution failed: {0}")]
    Query(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl PaginationError {
    pub(crate) fn query<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        PaginationError::Query(Box::new(err))
    }

    /// Whether the failure stems from request input (and should map to a
    /// 400-class response) rather than from the server side.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PaginationError::TokenDecode(_)
                | PaginationError::InvalidLimit { .. }
                | PaginationError::InvalidSortField { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PaginationError>;
