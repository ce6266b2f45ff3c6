//! Binary codec for sort-column values carried inside pagination tokens.
//!
//! Each value type reserves one bit pattern meaning "no value" (the unset
//! cursor of a first page):
//!
//! | type      | encoding                        | sentinel        |
//! |-----------|---------------------------------|-----------------|
//! | timestamp | 8-byte BE `i64` epoch seconds   | `-1`            |
//! | text      | UTF-8 bytes, rest of the buffer | empty           |
//! | int32     | 4-byte BE                       | `i32::MIN`      |
//! | int64     | 8-byte BE                       | `i64::MIN`      |
//!
//! A real column value equal to its sentinel cannot be represented. Encoding
//! one fails with [`TokenEncodeError::SentinelCollision`]; the schema rejects
//! such values at write time for every sortable column.
//!
//! Text values are limited to [`MAX_TEXT_VALUE_LEN`] bytes so every cursor
//! seals into a token shorter than
//! [`MAX_TOKEN_LEN`](super::cipher::MAX_TOKEN_LEN). Sortable text columns carry
//! the same limit in the schema.

use std::fmt::{self, Display, Formatter};

use chrono::{DateTime, SubsecRound, Utc};

use crate::error::{TokenDecodeError, TokenEncodeError};

pub const TIMESTAMP_SENTINEL: i64 = -1;
pub const INT32_SENTINEL: i32 = i32::MIN;
pub const INT64_SENTINEL: i64 = i64::MIN;

/// Longest text value, in bytes, a cursor may carry.
pub const MAX_TEXT_VALUE_LEN: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Timestamp,
    Text,
    Int32,
    Int64,
}

impl Display for ValueType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueType::Timestamp => "timestamp",
            ValueType::Text => "text",
            ValueType::Int32 => "int32",
            ValueType::Int64 => "int64",
        })
    }
}

/// The value of a row's sort column, as stored in a keyset boundary.
///
/// Ordering is only meaningful between values of the same variant; text
/// compares bytewise, matching the `"C"` collation the SQL executor sorts
/// with.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColumnValue {
    Timestamp(DateTime<Utc>),
    Text(String),
    Int32(i32),
    Int64(i64),
}

impl ColumnValue {
    /// Timestamp value truncated to whole seconds, the precision tokens carry.
    pub fn timestamp(at: DateTime<Utc>) -> Self {
        ColumnValue::Timestamp(at.trunc_subsecs(0))
    }

    pub fn text(value: impl Into<String>) -> Self {
        ColumnValue::Text(value.into())
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            ColumnValue::Timestamp(_) => ValueType::Timestamp,
            ColumnValue::Text(_) => ValueType::Text,
            ColumnValue::Int32(_) => ValueType::Int32,
            ColumnValue::Int64(_) => ValueType::Int64,
        }
    }

    /// Whether this value shares its encoding with the "no value" sentinel.
    pub fn is_sentinel(&self) -> bool {
        match self {
            ColumnValue::Timestamp(at) => at.timestamp() == TIMESTAMP_SENTINEL,
            ColumnValue::Text(text) => text.is_empty(),
            ColumnValue::Int32(value) => *value == INT32_SENTINEL,
            ColumnValue::Int64(value) => *value == INT64_SENTINEL,
        }
    }
}

impl Display for ColumnValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ColumnValue::Timestamp(at) => write!(f, "{}", at.to_rfc3339()),
            ColumnValue::Text(text) => write!(f, "{text:?}"),
            ColumnValue::Int32(value) => write!(f, "{value}"),
            ColumnValue::Int64(value) => write!(f, "{value}"),
        }
    }
}

/// Append `value` (or the sentinel of `value_type` when absent) to `out`.
pub fn encode_value(
    value_type: ValueType,
    value: Option<&ColumnValue>,
    out: &mut Vec<u8>,
) -> Result<(), TokenEncodeError> {
    let Some(value) = value else {
        match value_type {
            ValueType::Timestamp => out.extend_from_slice(&TIMESTAMP_SENTINEL.to_be_bytes()),
            ValueType::Text => {}
            ValueType::Int32 => out.extend_from_slice(&INT32_SENTINEL.to_be_bytes()),
            ValueType::Int64 => out.extend_from_slice(&INT64_SENTINEL.to_be_bytes()),
        }
        return Ok(());
    };

    if value.value_type() != value_type {
        return Err(TokenEncodeError::TypeMismatch {
            expected: value_type,
            found: value.value_type(),
        });
    }
    if value.is_sentinel() {
        return Err(TokenEncodeError::SentinelCollision { value_type });
    }

    match value {
        ColumnValue::Timestamp(at) => {
            if at.timestamp_subsec_nanos() != 0 {
                return Err(TokenEncodeError::SubsecondTimestamp);
            }
            out.extend_from_slice(&at.timestamp().to_be_bytes());
        }
        ColumnValue::Text(text) => {
            if text.len() > MAX_TEXT_VALUE_LEN {
                return Err(TokenEncodeError::TextTooLong {
                    len: text.len(),
                    max: MAX_TEXT_VALUE_LEN,
                });
            }
            out.extend_from_slice(text.as_bytes());
        }
        ColumnValue::Int32(value) => out.extend_from_slice(&value.to_be_bytes()),
        ColumnValue::Int64(value) => out.extend_from_slice(&value.to_be_bytes()),
    }
    Ok(())
}

/// Decode a value of `value_type` occupying all of `bytes`.
///
/// Returns `Ok(None)` for the type's sentinel.
pub fn decode_value(
    value_type: ValueType,
    bytes: &[u8],
) -> Result<Option<ColumnValue>, TokenDecodeError> {
    match value_type {
        ValueType::Timestamp => {
            let seconds = i64::from_be_bytes(fixed::<8>(bytes)?);
            if seconds == TIMESTAMP_SENTINEL {
                return Ok(None);
            }
            DateTime::from_timestamp(seconds, 0)
                .map(|at| Some(ColumnValue::Timestamp(at)))
                .ok_or(TokenDecodeError::TimestampOutOfRange(seconds))
        }
        ValueType::Text => {
            if bytes.is_empty() {
                return Ok(None);
            }
            let text = std::str::from_utf8(bytes).map_err(|_| TokenDecodeError::InvalidUtf8)?;
            Ok(Some(ColumnValue::Text(text.to_owned())))
        }
        ValueType::Int32 => {
            let value = i32::from_be_bytes(fixed::<4>(bytes)?);
            Ok((value != INT32_SENTINEL).then_some(ColumnValue::Int32(value)))
        }
        ValueType::Int64 => {
            let value = i64::from_be_bytes(fixed::<8>(bytes)?);
            Ok((value != INT64_SENTINEL).then_some(ColumnValue::Int64(value)))
        }
    }
}

fn fixed<const N: usize>(bytes: &[u8]) -> Result<[u8; N], TokenDecodeError> {
    if bytes.len() < N {
        return Err(TokenDecodeError::Truncated {
            needed: N,
            found: bytes.len(),
        });
    }
    if bytes.len() > N {
        return Err(TokenDecodeError::TrailingBytes(bytes.len() - N));
    }
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn encoded(value_type: ValueType, value: Option<&ColumnValue>) -> Vec<u8> {
        let mut out = Vec::new();
        encode_value(value_type, value, &mut out).expect("encodable value");
        out
    }

    #[test]
    fn absent_values_use_type_sentinels() {
        assert_eq!(encoded(ValueType::Timestamp, None), (-1i64).to_be_bytes());
        assert!(encoded(ValueType::Text, None).is_empty());
        assert_eq!(encoded(ValueType::Int32, None), i32::MIN.to_be_bytes());
        assert_eq!(encoded(ValueType::Int64, None), i64::MIN.to_be_bytes());

        for value_type in [
            ValueType::Timestamp,
            ValueType::Text,
            ValueType::Int32,
            ValueType::Int64,
        ] {
            let bytes = encoded(value_type, None);
            assert_eq!(decode_value(value_type, &bytes).unwrap(), None);
        }
    }

    #[test]
    fn timestamps_encode_epoch_seconds_big_endian() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let value = ColumnValue::Timestamp(at);
        let bytes = encoded(ValueType::Timestamp, Some(&value));
        assert_eq!(bytes, at.timestamp().to_be_bytes());
        assert_eq!(decode_value(ValueType::Timestamp, &bytes).unwrap(), Some(value));
    }

    #[test]
    fn timestamp_constructor_drops_subseconds() {
        let at = Utc.timestamp_opt(1_700_000_000, 987_654_321).unwrap();
        let value = ColumnValue::timestamp(at);
        assert_eq!(
            value,
            ColumnValue::Timestamp(Utc.timestamp_opt(1_700_000_000, 0).unwrap())
        );
    }

    #[test]
    fn subsecond_timestamps_are_refused() {
        let at = Utc.timestamp_opt(1_700_000_000, 5).unwrap();
        let err = encode_value(
            ValueType::Timestamp,
            Some(&ColumnValue::Timestamp(at)),
            &mut Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, TokenEncodeError::SubsecondTimestamp));
    }

    #[test]
    fn pre_epoch_timestamps_other_than_sentinel_roundtrip() {
        let at = Utc.timestamp_opt(-86_400, 0).unwrap();
        let value = ColumnValue::Timestamp(at);
        let bytes = encoded(ValueType::Timestamp, Some(&value));
        assert_eq!(decode_value(ValueType::Timestamp, &bytes).unwrap(), Some(value));
    }

    #[test]
    fn sentinel_collisions_fail_loudly() {
        let colliding = [
            ColumnValue::Timestamp(Utc.timestamp_opt(-1, 0).unwrap()),
            ColumnValue::text(""),
            ColumnValue::Int32(i32::MIN),
            ColumnValue::Int64(i64::MIN),
        ];
        for value in colliding {
            let mut out = Vec::new();
            let err = encode_value(value.value_type(), Some(&value), &mut out).unwrap_err();
            assert!(
                matches!(err, TokenEncodeError::SentinelCollision { value_type } if value_type == value.value_type()),
                "{value:?} should collide, got {err:?}"
            );
            assert!(out.is_empty(), "nothing is written on failure");
        }
    }

    #[test]
    fn neighbours_of_sentinels_are_representable() {
        for value in [
            ColumnValue::Int32(i32::MIN + 1),
            ColumnValue::Int64(i64::MIN + 1),
            ColumnValue::Timestamp(Utc.timestamp_opt(0, 0).unwrap()),
            ColumnValue::Timestamp(Utc.timestamp_opt(-2, 0).unwrap()),
            ColumnValue::text(" "),
        ] {
            let bytes = encoded(value.value_type(), Some(&value));
            assert_eq!(decode_value(value.value_type(), &bytes).unwrap(), Some(value));
        }
    }

    #[test]
    fn mismatched_variant_is_rejected() {
        let err = encode_value(ValueType::Int64, Some(&ColumnValue::Int32(3)), &mut Vec::new())
            .unwrap_err();
        assert!(matches!(
            err,
            TokenEncodeError::TypeMismatch {
                expected: ValueType::Int64,
                found: ValueType::Int32
            }
        ));
    }

    #[test]
    fn short_buffers_are_truncation_errors() {
        assert!(matches!(
            decode_value(ValueType::Int32, &[0, 1, 2]),
            Err(TokenDecodeError::Truncated { needed: 4, found: 3 })
        ));
        assert!(matches!(
            decode_value(ValueType::Timestamp, &[]),
            Err(TokenDecodeError::Truncated { needed: 8, found: 0 })
        ));
        assert!(matches!(
            decode_value(ValueType::Int64, &[0; 9]),
            Err(TokenDecodeError::TrailingBytes(1))
        ));
    }

    #[test]
    fn invalid_utf8_text_is_rejected() {
        assert!(matches!(
            decode_value(ValueType::Text, &[0xff, 0xfe]),
            Err(TokenDecodeError::InvalidUtf8)
        ));
    }

    #[test]
    fn text_longer_than_limit_is_refused() {
        let longest = ColumnValue::text("é".repeat(MAX_TEXT_VALUE_LEN / 2));
        let bytes = encoded(ValueType::Text, Some(&longest));
        assert_eq!(bytes.len(), MAX_TEXT_VALUE_LEN);

        let mut out = Vec::new();
        let err = encode_value(
            ValueType::Text,
            Some(&ColumnValue::text("x".repeat(MAX_TEXT_VALUE_LEN + 1))),
            &mut out,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TokenEncodeError::TextTooLong { len, max: MAX_TEXT_VALUE_LEN } if len == MAX_TEXT_VALUE_LEN + 1
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn text_orders_bytewise() {
        assert!(ColumnValue::text("Zebra") < ColumnValue::text("apple"));
        assert!(ColumnValue::text("abc") < ColumnValue::text("abcd"));
    }

    proptest! {
        #[test]
        fn int32_roundtrip(value in any::<i32>().prop_filter("sentinel", |v| *v != i32::MIN)) {
            let value = ColumnValue::Int32(value);
            let bytes = encoded(ValueType::Int32, Some(&value));
            prop_assert_eq!(decode_value(ValueType::Int32, &bytes).unwrap(), Some(value));
        }

        #[test]
        fn int64_roundtrip(value in any::<i64>().prop_filter("sentinel", |v| *v != i64::MIN)) {
            let value = ColumnValue::Int64(value);
            let bytes = encoded(ValueType::Int64, Some(&value));
            prop_assert_eq!(decode_value(ValueType::Int64, &bytes).unwrap(), Some(value));
        }

        #[test]
        fn text_roundtrip(text in "\\PC{1,64}") {
            let value = ColumnValue::text(text);
            let bytes = encoded(ValueType::Text, Some(&value));
            prop_assert_eq!(decode_value(ValueType::Text, &bytes).unwrap(), Some(value));
        }

        #[test]
        fn timestamp_roundtrip(seconds in 0i64..=4_102_444_800) {
            let value = ColumnValue::Timestamp(DateTime::from_timestamp(seconds, 0).unwrap());
            let bytes = encoded(ValueType::Timestamp, Some(&value));
            prop_assert_eq!(decode_value(ValueType::Timestamp, &bytes).unwrap(), Some(value));
        }
    }
}
