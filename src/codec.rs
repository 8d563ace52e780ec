//! Binary codecs used to turn keys and values into bytes and back
//!
//! A codec is only consulted for Key and Value tokens and for payload
//! replies decoded through [`ArbitraryOutput`](crate::protocol::output::ArbitraryOutput).
//! Keywords, numbers and other protocol scalars never go through it.

use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::CodecError;

/// Converts domain values to and from their stored byte representation
pub trait BinaryCodec: Send + Sync {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Bytes, CodecError>;

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError>;
}

impl<C: BinaryCodec> BinaryCodec for &C {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Bytes, CodecError> {
        (**self).encode(value)
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        (**self).decode(bytes)
    }
}

/// Plain text codec
///
/// Strings are stored as their raw UTF-8 bytes, numbers and booleans as their
/// textual form. Anything structured falls back to JSON. Decoding reads the
/// bytes as a plain string first when the target accepts one, so `String`
/// values round-trip unchanged, and parses JSON otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCodec;

impl BinaryCodec for TextCodec {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Bytes, CodecError> {
        match value.serialize(ScalarSerializer) {
            Ok(text) => Ok(Bytes::from(text)),
            Err(ScalarError::NotScalar) => serde_json::to_vec(value)
                .map(Bytes::from)
                .map_err(|e| CodecError::Encode(e.to_string())),
            Err(ScalarError::Rejected(msg)) => Err(CodecError::Encode(msg)),
        }
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        if let Ok(text) = std::str::from_utf8(bytes) {
            let plain = serde_json::Value::String(text.to_string());
            if let Ok(value) = serde_json::from_value::<T>(plain) {
                return Ok(value);
            }
        }
        serde_json::from_slice(bytes).map_err(|e| CodecError::Decode(e.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
enum ScalarError {
    #[error("value is not a scalar")]
    NotScalar,
    #[error("{0}")]
    Rejected(String),
}

impl serde::ser::Error for ScalarError {
    fn custom<M: std::fmt::Display>(msg: M) -> Self {
        ScalarError::Rejected(msg.to_string())
    }
}

/// Renders a top-level scalar as text; anything else reports `NotScalar`
struct ScalarSerializer;

type NotScalar = serde::ser::Impossible<String, ScalarError>;

macro_rules! display_scalar {
    ($($method:ident: $ty:ty),+) => {
        $(
            fn $method(self, v: $ty) -> Result<String, ScalarError> {
                Ok(v.to_string())
            }
        )+
    };
}

impl serde::Serializer for ScalarSerializer {
    type Ok = String;
    type Error = ScalarError;
    type SerializeSeq = NotScalar;
    type SerializeTuple = NotScalar;
    type SerializeTupleStruct = NotScalar;
    type SerializeTupleVariant = NotScalar;
    type SerializeMap = NotScalar;
    type SerializeStruct = NotScalar;
    type SerializeStructVariant = NotScalar;

    display_scalar!(
        serialize_bool: bool,
        serialize_i8: i8,
        serialize_i16: i16,
        serialize_i32: i32,
        serialize_i64: i64,
        serialize_i128: i128,
        serialize_u8: u8,
        serialize_u16: u16,
        serialize_u32: u32,
        serialize_u64: u64,
        serialize_u128: u128,
        serialize_char: char,
        serialize_str: &str
    );

    fn serialize_f32(self, v: f32) -> Result<String, ScalarError> {
        if v.is_finite() {
            Ok(v.to_string())
        } else {
            Err(ScalarError::Rejected(format!("non-finite float {}", v)))
        }
    }

    fn serialize_f64(self, v: f64) -> Result<String, ScalarError> {
        if v.is_finite() {
            Ok(v.to_string())
        } else {
            Err(ScalarError::Rejected(format!("non-finite float {}", v)))
        }
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String, ScalarError> {
        Err(ScalarError::NotScalar)
    }

    fn serialize_none(self) -> Result<String, ScalarError> {
        Err(ScalarError::NotScalar)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<String, ScalarError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<String, ScalarError> {
        Err(ScalarError::NotScalar)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<String, ScalarError> {
        Err(ScalarError::NotScalar)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
    ) -> Result<String, ScalarError> {
        Ok(variant.to_string())
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<String, ScalarError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String, ScalarError> {
        Err(ScalarError::NotScalar)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<NotScalar, ScalarError> {
        Err(ScalarError::NotScalar)
    }

    fn serialize_tuple(self, _len: usize) -> Result<NotScalar, ScalarError> {
        Err(ScalarError::NotScalar)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<NotScalar, ScalarError> {
        Err(ScalarError::NotScalar)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<NotScalar, ScalarError> {
        Err(ScalarError::NotScalar)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<NotScalar, ScalarError> {
        Err(ScalarError::NotScalar)
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<NotScalar, ScalarError> {
        Err(ScalarError::NotScalar)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<NotScalar, ScalarError> {
        Err(ScalarError::NotScalar)
    }
}

/// Strict JSON codec
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl BinaryCodec for JsonCodec {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Bytes, CodecError> {
        serde_json::to_vec(value)
            .map(Bytes::from)
            .map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::Decode(e.to_string()))
    }
}
