//! Reply decoders
//!
//! An [`Output`] turns a raw [`Value`] into a typed result. A reply of the
//! wrong shape is a [`Error::Decode`]; an error reply found where data was
//! expected is passed through as [`Error::Server`].

use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::codec::BinaryCodec;
use crate::error::{Error, Result};
use crate::protocol::resp::Value;

/// Decodes a raw reply into `Self::Target`
pub trait Output: Send + Sync {
    type Target;

    fn decode<C: BinaryCodec>(&self, codec: &C, reply: Value) -> Result<Self::Target>;

    /// Post-process the decoded value
    fn map<U, F>(self, f: F) -> Mapped<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Target) -> U + Send + Sync,
    {
        Mapped { inner: self, f }
    }
}

fn unexpected<T>(expected: &'static str, reply: &Value) -> Result<T> {
    match reply {
        Value::Error(msg) => Err(Error::Server(msg.clone())),
        other => Err(Error::decode(expected, other.kind())),
    }
}

/// Parse a textual double, accepting the server's infinity spellings
pub fn parse_double(bytes: &[u8]) -> Option<f64> {
    let text = std::str::from_utf8(bytes).ok()?;
    match text {
        "inf" | "+inf" => Some(f64::INFINITY),
        "-inf" => Some(f64::NEG_INFINITY),
        _ => text.parse().ok(),
    }
}

pub struct Mapped<O, F> {
    inner: O,
    f: F,
}

impl<O, F, U> Output for Mapped<O, F>
where
    O: Output,
    F: Fn(O::Target) -> U + Send + Sync,
{
    type Target = U;

    fn decode<C: BinaryCodec>(&self, codec: &C, reply: Value) -> Result<U> {
        self.inner.decode(codec, reply).map(&self.f)
    }
}

/// `+OK`
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitOutput;

impl Output for UnitOutput {
    type Target = ();

    fn decode<C: BinaryCodec>(&self, _codec: &C, reply: Value) -> Result<()> {
        match reply {
            Value::SimpleString(ref s) if s == "OK" => Ok(()),
            other => unexpected("OK", &other),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LongOutput;

impl Output for LongOutput {
    type Target = i64;

    fn decode<C: BinaryCodec>(&self, _codec: &C, reply: Value) -> Result<i64> {
        match reply {
            Value::Integer(i) => Ok(i),
            other => unexpected("integer", &other),
        }
    }
}

/// Integer reply restricted to `0` / `1`
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolOutput;

impl Output for BoolOutput {
    type Target = bool;

    fn decode<C: BinaryCodec>(&self, _codec: &C, reply: Value) -> Result<bool> {
        match reply {
            Value::Integer(0) => Ok(false),
            Value::Integer(1) => Ok(true),
            Value::Integer(i) => Err(Error::decode("0 or 1", format!("integer {}", i))),
            other => unexpected("0 or 1", &other),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleOutput;

impl Output for DoubleOutput {
    type Target = f64;

    fn decode<C: BinaryCodec>(&self, _codec: &C, reply: Value) -> Result<f64> {
        let bytes = match &reply {
            Value::BulkString(Some(bytes)) => bytes.as_slice(),
            Value::SimpleString(s) => s.as_bytes(),
            other => return unexpected("double", other),
        };
        parse_double(bytes).ok_or_else(|| {
            Error::decode("double", format!("`{}`", String::from_utf8_lossy(bytes)))
        })
    }
}

/// UTF-8 text from a bulk or simple string
#[derive(Debug, Clone, Copy, Default)]
pub struct StringOutput;

impl Output for StringOutput {
    type Target = String;

    fn decode<C: BinaryCodec>(&self, _codec: &C, reply: Value) -> Result<String> {
        match reply {
            Value::SimpleString(s) => Ok(s),
            Value::BulkString(Some(bytes)) => String::from_utf8(bytes)
                .map_err(|_| Error::decode("utf-8 string", "non utf-8 bulk string")),
            other => unexpected("string", &other),
        }
    }
}

/// Payload decoded with the binary codec
pub struct ArbitraryOutput<T>(PhantomData<fn() -> T>);

impl<T> ArbitraryOutput<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for ArbitraryOutput<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DeserializeOwned> Output for ArbitraryOutput<T> {
    type Target = T;

    fn decode<C: BinaryCodec>(&self, codec: &C, reply: Value) -> Result<T> {
        match reply {
            Value::BulkString(Some(bytes)) => Ok(codec.decode(&bytes)?),
            Value::SimpleString(s) => Ok(codec.decode(s.as_bytes())?),
            Value::Integer(i) => Ok(codec.decode(i.to_string().as_bytes())?),
            other => unexpected("bulk string", &other),
        }
    }
}

/// Nil reply becomes `None`
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionalOutput<O>(pub O);

impl<O: Output> Output for OptionalOutput<O> {
    type Target = Option<O::Target>;

    fn decode<C: BinaryCodec>(&self, codec: &C, reply: Value) -> Result<Self::Target> {
        if reply.is_nil() {
            return Ok(None);
        }
        self.0.decode(codec, reply).map(Some)
    }
}

/// Array reply, every element decoded by the inner decoder. A nil array is empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChunkOutput<O>(pub O);

impl<O: Output> Output for ChunkOutput<O> {
    type Target = Vec<O::Target>;

    fn decode<C: BinaryCodec>(&self, codec: &C, reply: Value) -> Result<Self::Target> {
        match reply {
            Value::Array(Some(items)) => items
                .into_iter()
                .map(|item| self.0.decode(codec, item))
                .collect(),
            Value::Array(None) => Ok(Vec::new()),
            other => unexpected("array", &other),
        }
    }
}

/// Flat array `[a1, b1, a2, b2, ...]` read as pairs
#[derive(Debug, Clone, Copy, Default)]
pub struct PairsOutput<A, B>(pub A, pub B);

impl<A: Output, B: Output> Output for PairsOutput<A, B> {
    type Target = Vec<(A::Target, B::Target)>;

    fn decode<C: BinaryCodec>(&self, codec: &C, reply: Value) -> Result<Self::Target> {
        let items = match reply {
            Value::Array(Some(items)) => items,
            Value::Array(None) => return Ok(Vec::new()),
            other => return unexpected("array of pairs", &other),
        };
        if items.len() % 2 != 0 {
            return Err(Error::decode(
                "array of pairs",
                format!("array of odd length {}", items.len()),
            ));
        }

        let mut pairs = Vec::with_capacity(items.len() / 2);
        let mut items = items.into_iter();
        while let (Some(a), Some(b)) = (items.next(), items.next()) {
            pairs.push((self.0.decode(codec, a)?, self.1.decode(codec, b)?));
        }
        Ok(pairs)
    }
}

/// Two parallel arrays `[[a1, a2, ...], [b1, b2, ...]]` zipped into pairs
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipOutput<A, B>(pub A, pub B);

impl<A: Output, B: Output> Output for ZipOutput<A, B> {
    type Target = Vec<(A::Target, B::Target)>;

    fn decode<C: BinaryCodec>(&self, codec: &C, reply: Value) -> Result<Self::Target> {
        let (left, right) = match reply {
            Value::Array(Some(mut items)) if items.len() == 2 => {
                let right = items.pop();
                let left = items.pop();
                match (left, right) {
                    (Some(Value::Array(Some(l))), Some(Value::Array(Some(r)))) => (l, r),
                    _ => return Err(Error::decode("two arrays", "array of non-arrays")),
                }
            }
            other => return unexpected("two arrays", &other),
        };
        if left.len() != right.len() {
            return Err(Error::decode(
                "arrays of equal length",
                format!("lengths {} and {}", left.len(), right.len()),
            ));
        }

        left.into_iter()
            .zip(right)
            .map(|(a, b)| -> Result<_> { Ok((self.0.decode(codec, a)?, self.1.decode(codec, b)?)) })
            .collect()
    }
}

/// Array of exactly two elements
#[derive(Debug, Clone, Copy, Default)]
pub struct Tuple2Output<A, B>(pub A, pub B);

impl<A: Output, B: Output> Output for Tuple2Output<A, B> {
    type Target = (A::Target, B::Target);

    fn decode<C: BinaryCodec>(&self, codec: &C, reply: Value) -> Result<Self::Target> {
        match reply {
            Value::Array(Some(items)) if items.len() == 2 => {
                let mut items = items.into_iter();
                match (items.next(), items.next()) {
                    (Some(a), Some(b)) => Ok((self.0.decode(codec, a)?, self.1.decode(codec, b)?)),
                    _ => Err(Error::decode("array of 2", "short array")),
                }
            }
            Value::Array(Some(items)) => Err(Error::decode(
                "array of 2",
                format!("array of {}", items.len()),
            )),
            other => unexpected("array of 2", &other),
        }
    }
}

/// Cursor-based scan page: `[cursor, [items...]]`
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOutput<O>(pub O);

impl<O: Output> Output for ScanOutput<O> {
    type Target = (u64, Vec<O::Target>);

    fn decode<C: BinaryCodec>(&self, codec: &C, reply: Value) -> Result<Self::Target> {
        let (raw, items) = Tuple2Output(StringOutput, ChunkOutput(&self.0)).decode(codec, reply)?;
        let cursor = raw
            .parse::<u64>()
            .map_err(|_| Error::decode("numeric cursor", format!("`{}`", raw)))?;
        Ok((cursor, items))
    }
}

impl<O: Output> Output for &O {
    type Target = O::Target;

    fn decode<C: BinaryCodec>(&self, codec: &C, reply: Value) -> Result<Self::Target> {
        (**self).decode(codec, reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::TextCodec;

    #[test]
    fn test_scalars() {
        let codec = TextCodec;
        assert_eq!(LongOutput.decode(&codec, Value::Integer(3)).unwrap(), 3);
        assert!(BoolOutput.decode(&codec, Value::Integer(1)).unwrap());
        assert!(!BoolOutput.decode(&codec, Value::Integer(0)).unwrap());
        assert_eq!(DoubleOutput.decode(&codec, Value::bulk("1.5")).unwrap(), 1.5);
        assert_eq!(
            DoubleOutput.decode(&codec, Value::bulk("-inf")).unwrap(),
            f64::NEG_INFINITY
        );
        assert!(UnitOutput.decode(&codec, Value::ok()).is_ok());
    }

    #[test]
    fn test_wrong_shape_reports_expected_and_actual() {
        let err = LongOutput.decode(&TextCodec, Value::bulk("3")).unwrap_err();
        match err {
            Error::Decode { expected, actual } => {
                assert_eq!(expected, "integer");
                assert_eq!(actual, "bulk string");
            }
            other => panic!("Expected decode error, got {:?}", other),
        }

        let err = BoolOutput.decode(&TextCodec, Value::Integer(2)).unwrap_err();
        assert!(err.is_decode());

        let err = DoubleOutput.decode(&TextCodec, Value::bulk("abc")).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_error_reply_is_server_error() {
        let err = LongOutput
            .decode(&TextCodec, Value::error("WRONGTYPE bad"))
            .unwrap_err();
        assert!(matches!(err, Error::Server(msg) if msg == "WRONGTYPE bad"));
    }

    #[test]
    fn test_optional_double_nil_is_absent() {
        let out = OptionalOutput(DoubleOutput);
        assert_eq!(out.decode(&TextCodec, Value::BulkString(None)).unwrap(), None);
        assert_eq!(out.decode(&TextCodec, Value::bulk("2")).unwrap(), Some(2.0));
    }

    #[test]
    fn test_chunk_of_arbitrary() {
        let out = ChunkOutput(ArbitraryOutput::<String>::new());
        let reply = Value::array([Value::bulk("a"), Value::bulk("b")]);
        assert_eq!(out.decode(&TextCodec, reply).unwrap(), vec!["a", "b"]);
        assert!(out.decode(&TextCodec, Value::Array(None)).unwrap().is_empty());

        let nested = Value::array([Value::bulk("a"), Value::error("ERR inner")]);
        assert!(matches!(out.decode(&TextCodec, nested), Err(Error::Server(_))));
    }

    #[test]
    fn test_pairs_and_map() {
        let out = PairsOutput(ArbitraryOutput::<String>::new(), DoubleOutput)
            .map(|pairs| pairs.into_iter().map(|(m, s)| format!("{}={}", m, s)).collect::<Vec<_>>());
        let reply = Value::array([
            Value::bulk("x"),
            Value::bulk("1.5"),
            Value::bulk("y"),
            Value::bulk("2"),
        ]);
        assert_eq!(out.decode(&TextCodec, reply).unwrap(), vec!["x=1.5", "y=2"]);

        let odd = Value::array([Value::bulk("x")]);
        let err = PairsOutput(LongOutput, LongOutput).decode(&TextCodec, odd).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_zip_parallel_arrays() {
        let out = ZipOutput(ArbitraryOutput::<String>::new(), DoubleOutput);
        let reply = Value::array([
            Value::array([Value::bulk("a"), Value::bulk("b")]),
            Value::array([Value::bulk("1"), Value::bulk("2.5")]),
        ]);
        assert_eq!(
            out.decode(&TextCodec, reply).unwrap(),
            vec![("a".to_string(), 1.0), ("b".to_string(), 2.5)]
        );

        let uneven = Value::array([
            Value::array([Value::bulk("a")]),
            Value::array([]),
        ]);
        assert!(out.decode(&TextCodec, uneven).unwrap_err().is_decode());
    }

    #[test]
    fn test_scan_page() {
        let out = ScanOutput(ArbitraryOutput::<String>::new());
        let reply = Value::array([
            Value::bulk("17"),
            Value::array([Value::bulk("m1"), Value::bulk("m2")]),
        ]);
        let (cursor, items) = out.decode(&TextCodec, reply).unwrap();
        assert_eq!(cursor, 17);
        assert_eq!(items, vec!["m1", "m2"]);

        let bad = Value::array([Value::bulk("x"), Value::array([])]);
        assert!(out.decode(&TextCodec, bad).unwrap_err().is_decode());
    }

    #[test]
    fn test_arbitrary_decode_failure_is_codec_error() {
        let out = ArbitraryOutput::<i64>::new();
        let err = out.decode(&TextCodec, Value::bulk("abc")).unwrap_err();
        assert!(matches!(err, Error::Codec(_)));
        assert!(err.is_decode());
    }
}
