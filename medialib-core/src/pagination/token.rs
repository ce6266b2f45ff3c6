//! Binary cursor layout and its opaque token form.
//!
//! ```text
//! offset  width  field
//! 0       1      version (TOKEN_VERSION)
//! 1       1      entity kind
//! 2       4      sort field ordinal, i32 BE
//! 6       1      descending flag (0/1)
//! 7       1      previous-cursor flag (0/1)
//! 8       4      secondary key, i32 BE, -1 when absent
//! 12      ..     column value (see `value`)
//! ```
//!
//! The buffer is sealed by a [`TokenCipher`]; the version and entity bytes let
//! a decoder reject tokens from an older layout or another collection even
//! when their sort ordinals happen to be valid.

use std::fmt;
use std::sync::Arc;

use medialib_model::{EntityKind, SortField};
use tracing::warn;

use super::cipher::{MAX_TOKEN_LEN, TokenCipher};
use super::state::{Boundary, PaginationState};
use super::value::{decode_value, encode_value};
use crate::adapters::EntityAdapter;
use crate::error::{TokenDecodeError, TokenEncodeError};

pub const TOKEN_VERSION: u8 = 1;

const HEADER_LEN: usize = 12;
const NO_SECONDARY_KEY: i32 = -1;

#[derive(Clone)]
pub struct TokenCodec {
    cipher: Arc<dyn TokenCipher>,
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec").finish_non_exhaustive()
    }
}

impl TokenCodec {
    pub fn new(cipher: Arc<dyn TokenCipher>) -> Self {
        Self { cipher }
    }

    /// Seal `state` into a token for `adapter`'s collection.
    ///
    /// Tokens longer than [`MAX_TOKEN_LEN`] are refused here, since `decode`
    /// would reject them.
    pub fn encode<S: SortField, R>(
        &self,
        adapter: &EntityAdapter<S, R>,
        state: &PaginationState<S>,
    ) -> Result<String, TokenEncodeError> {
        let bytes = encode_state(adapter, state)?;
        let token = self.cipher.seal(&bytes).map_err(TokenEncodeError::Cipher)?;
        if token.len() > MAX_TOKEN_LEN {
            return Err(TokenEncodeError::TooLong {
                len: token.len(),
                max: MAX_TOKEN_LEN,
            });
        }
        Ok(token)
    }

    /// Decode `token` for `adapter`'s collection.
    ///
    /// Never falls back to a fresh state: any failure is returned as is.
    pub fn decode<S: SortField, R>(
        &self,
        adapter: &EntityAdapter<S, R>,
        token: &str,
    ) -> Result<PaginationState<S>, TokenDecodeError> {
        let bytes = self
            .cipher
            .open(token.trim())
            .map_err(TokenDecodeError::Malformed)?;
        decode_state(adapter, &bytes).inspect_err(|err| {
            // Authenticated but structurally invalid: our own key minted it,
            // so this is a stale layout or a token from another collection.
            warn!(entity = %adapter.kind, error = %err, "rejected authenticated pagination token");
        })
    }
}

pub(crate) fn encode_state<S: SortField, R>(
    adapter: &EntityAdapter<S, R>,
    state: &PaginationState<S>,
) -> Result<Vec<u8>, TokenEncodeError> {
    let column = adapter.column(state.sort);
    let mut out = Vec::with_capacity(HEADER_LEN + 16);

    out.push(TOKEN_VERSION);
    out.push(adapter.kind.as_u8());
    out.extend_from_slice(&state.sort.ordinal().to_be_bytes());
    out.push(u8::from(state.descending));
    out.push(u8::from(state.previous));

    match &state.boundary {
        Some(Boundary { id, value }) => {
            if *id < 0 {
                return Err(TokenEncodeError::SecondaryKeyOutOfRange(*id));
            }
            out.extend_from_slice(&id.to_be_bytes());
            encode_value(column.value_type, Some(value), &mut out)?;
        }
        None => {
            out.extend_from_slice(&NO_SECONDARY_KEY.to_be_bytes());
            encode_value(column.value_type, None, &mut out)?;
        }
    }

    Ok(out)
}

pub(crate) fn decode_state<S: SortField, R>(
    adapter: &EntityAdapter<S, R>,
    bytes: &[u8],
) -> Result<PaginationState<S>, TokenDecodeError> {
    if bytes.len() < HEADER_LEN {
        return Err(TokenDecodeError::Truncated {
            needed: HEADER_LEN,
            found: bytes.len(),
        });
    }

    let version = bytes[0];
    if version != TOKEN_VERSION {
        return Err(TokenDecodeError::UnsupportedVersion(version));
    }

    let entity = bytes[1];
    if EntityKind::from_u8(entity) != Some(adapter.kind) {
        return Err(TokenDecodeError::EntityMismatch {
            expected: adapter.kind,
            found: entity,
        });
    }

    let ordinal = read_i32(&bytes[2..6]);
    let sort = adapter
        .sort_for_ordinal(ordinal)
        .ok_or(TokenDecodeError::UnknownSortField {
            entity: adapter.kind,
            ordinal,
        })?;

    let descending = read_flag("descending", bytes[6])?;
    let previous = read_flag("previous", bytes[7])?;

    let secondary_key = read_i32(&bytes[8..12]);
    if secondary_key < NO_SECONDARY_KEY {
        return Err(TokenDecodeError::InvalidSecondaryKey(secondary_key));
    }

    let value = decode_value(adapter.column(sort).value_type, &bytes[HEADER_LEN..])?;
    let boundary = match (secondary_key, value) {
        (NO_SECONDARY_KEY, None) => None,
        (NO_SECONDARY_KEY, Some(_)) | (_, None) => {
            return Err(TokenDecodeError::PartialBoundary);
        }
        (id, Some(value)) => Some(Boundary { id, value }),
    };

    Ok(PaginationState {
        sort,
        descending,
        previous,
        boundary,
    })
}

fn read_i32(bytes: &[u8]) -> i32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(bytes);
    i32::from_be_bytes(buf)
}

fn read_flag(field: &'static str, value: u8) -> Result<bool, TokenDecodeError> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(TokenDecodeError::InvalidFlag { field, value }),
    }
}
