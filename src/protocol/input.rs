//! Argument encoders
//!
//! An [`Input<T>`] turns a `T` into [`WireArgs`]. Encoders are plain values
//! with no interior state, so one instance can be shared by any number of
//! concurrent requests. Encoders only fail when the binary codec refuses a
//! key or value; protocol scalars always encode.

use std::marker::PhantomData;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::codec::BinaryCodec;
use crate::error::CodecError;
use crate::protocol::token::{WireArgs, WireToken};

/// Encodes a `T` into request arguments
pub trait Input<T: ?Sized>: Send + Sync {
    fn encode<C: BinaryCodec>(&self, codec: &C, value: &T) -> Result<WireArgs, CodecError>;

    /// Derive an encoder for `U` by converting to `T` first
    fn contramap<U, F>(self, f: F) -> Contramap<Self, F, T>
    where
        Self: Sized,
        T: Sized,
        U: ?Sized,
        F: Fn(&U) -> T + Send + Sync,
    {
        Contramap {
            inner: self,
            f,
            _marker: PhantomData,
        }
    }
}

impl<T: ?Sized, I: Input<T>> Input<T> for &I {
    fn encode<C: BinaryCodec>(&self, codec: &C, value: &T) -> Result<WireArgs, CodecError> {
        (**self).encode(codec, value)
    }
}

/// Encoder produced by [`Input::contramap`]
pub struct Contramap<I, F, T> {
    inner: I,
    f: F,
    _marker: PhantomData<fn() -> T>,
}

impl<U, T, I, F> Input<U> for Contramap<I, F, T>
where
    U: ?Sized,
    I: Input<T>,
    F: Fn(&U) -> T + Send + Sync,
{
    fn encode<C: BinaryCodec>(&self, codec: &C, value: &U) -> Result<WireArgs, CodecError> {
        self.inner.encode(codec, &(self.f)(value))
    }
}

/// Renders a double the way the server parses scores
pub fn format_double(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value == f64::INFINITY {
        "+inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        value.to_string()
    }
}

/// Encodes nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl Input<()> for NoInput {
    fn encode<C: BinaryCodec>(&self, _codec: &C, _value: &()) -> Result<WireArgs, CodecError> {
        Ok(WireArgs::empty())
    }
}

/// Plain string argument, sent as-is
#[derive(Debug, Clone, Copy, Default)]
pub struct StringInput;

impl<S: AsRef<str> + ?Sized> Input<S> for StringInput {
    fn encode<C: BinaryCodec>(&self, _codec: &C, value: &S) -> Result<WireArgs, CodecError> {
        Ok(WireArgs::opaque(value.as_ref()))
    }
}

/// Integer argument in decimal
#[derive(Debug, Clone, Copy, Default)]
pub struct LongInput;

macro_rules! long_input {
    ($($ty:ty),+) => {
        $(
            impl Input<$ty> for LongInput {
                fn encode<C: BinaryCodec>(&self, _codec: &C, value: &$ty) -> Result<WireArgs, CodecError> {
                    Ok(WireArgs::opaque(value))
                }
            }
        )+
    };
}

long_input!(i32, i64, u32, u64, usize);

#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleInput;

impl Input<f64> for DoubleInput {
    fn encode<C: BinaryCodec>(&self, _codec: &C, value: &f64) -> Result<WireArgs, CodecError> {
        Ok(WireArgs::opaque(format_double(*value)))
    }
}

/// Boolean as `1` / `0`
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolInput;

impl Input<bool> for BoolInput {
    fn encode<C: BinaryCodec>(&self, _codec: &C, value: &bool) -> Result<WireArgs, CodecError> {
        Ok(WireArgs::opaque(if *value { "1" } else { "0" }))
    }
}

/// Key argument, encoded with the binary codec and tagged as a key
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyInput;

impl<K: Serialize + ?Sized> Input<K> for KeyInput {
    fn encode<C: BinaryCodec>(&self, codec: &C, value: &K) -> Result<WireArgs, CodecError> {
        Ok(WireArgs::single(WireToken::Key(codec.encode(value)?)))
    }
}

/// Payload argument, encoded with the binary codec and tagged as a value
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueInput;

impl<V: Serialize + ?Sized> Input<V> for ValueInput {
    fn encode<C: BinaryCodec>(&self, codec: &C, value: &V) -> Result<WireArgs, CodecError> {
        Ok(WireArgs::single(WireToken::Value(codec.encode(value)?)))
    }
}

/// Duration in whole seconds; sub-second remainders are dropped
#[derive(Debug, Clone, Copy, Default)]
pub struct DurationSecondsInput;

impl Input<Duration> for DurationSecondsInput {
    fn encode<C: BinaryCodec>(&self, _codec: &C, value: &Duration) -> Result<WireArgs, CodecError> {
        Ok(WireArgs::opaque(value.as_secs()))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DurationMillisecondsInput;

impl Input<Duration> for DurationMillisecondsInput {
    fn encode<C: BinaryCodec>(&self, _codec: &C, value: &Duration) -> Result<WireArgs, CodecError> {
        Ok(WireArgs::opaque(value.as_millis()))
    }
}

/// Unix time in whole seconds. Times before the epoch encode as `0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeSecondsInput;

impl Input<SystemTime> for TimeSecondsInput {
    fn encode<C: BinaryCodec>(&self, _codec: &C, value: &SystemTime) -> Result<WireArgs, CodecError> {
        let since = value.duration_since(UNIX_EPOCH).unwrap_or_default();
        Ok(WireArgs::opaque(since.as_secs()))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TimeMillisecondsInput;

impl Input<SystemTime> for TimeMillisecondsInput {
    fn encode<C: BinaryCodec>(&self, _codec: &C, value: &SystemTime) -> Result<WireArgs, CodecError> {
        let since = value.duration_since(UNIX_EPOCH).unwrap_or_default();
        Ok(WireArgs::opaque(since.as_millis()))
    }
}

/// Emits nothing for `None`, delegates for `Some`
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionalInput<I>(pub I);

impl<A, I: Input<A>> Input<Option<A>> for OptionalInput<I> {
    fn encode<C: BinaryCodec>(&self, codec: &C, value: &Option<A>) -> Result<WireArgs, CodecError> {
        match value {
            Some(v) => self.0.encode(codec, v),
            None => Ok(WireArgs::empty()),
        }
    }
}

/// Head element followed by the tail, each encoded on its own
///
/// The caller guarantees at least one element by construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonEmptyList<I>(pub I);

impl<I> NonEmptyList<I> {
    fn encode_all<'a, A, C>(
        &self,
        codec: &C,
        items: impl Iterator<Item = &'a A>,
    ) -> Result<WireArgs, CodecError>
    where
        A: 'a,
        I: Input<A>,
        C: BinaryCodec,
    {
        let mut args = WireArgs::empty();
        for item in items {
            args.extend(self.0.encode(codec, item)?);
        }
        Ok(args)
    }
}

impl<A, I: Input<A>> Input<(A, Vec<A>)> for NonEmptyList<I> {
    fn encode<C: BinaryCodec>(&self, codec: &C, value: &(A, Vec<A>)) -> Result<WireArgs, CodecError> {
        self.encode_all(codec, std::iter::once(&value.0).chain(value.1.iter()))
    }
}

impl<'s, A, I: Input<A>> Input<(&'s A, &'s [A])> for NonEmptyList<I> {
    fn encode<C: BinaryCodec>(&self, codec: &C, value: &(&'s A, &'s [A])) -> Result<WireArgs, CodecError> {
        self.encode_all(codec, std::iter::once(value.0).chain(value.1.iter()))
    }
}

/// Zero or more elements, each encoded on its own
#[derive(Debug, Clone, Copy, Default)]
pub struct Varargs<I>(pub I);

impl<A, I: Input<A>> Input<[A]> for Varargs<I> {
    fn encode<C: BinaryCodec>(&self, codec: &C, value: &[A]) -> Result<WireArgs, CodecError> {
        let mut args = WireArgs::empty();
        for item in value {
            args.extend(self.0.encode(codec, item)?);
        }
        Ok(args)
    }
}

impl<A, I: Input<A>> Input<Vec<A>> for Varargs<I> {
    fn encode<C: BinaryCodec>(&self, codec: &C, value: &Vec<A>) -> Result<WireArgs, CodecError> {
        <Self as Input<[A]>>::encode(self, codec, value.as_slice())
    }
}

impl<'s, A, I: Input<A>> Input<&'s [A]> for Varargs<I> {
    fn encode<C: BinaryCodec>(&self, codec: &C, value: &&'s [A]) -> Result<WireArgs, CodecError> {
        <Self as Input<[A]>>::encode(self, codec, value)
    }
}

// A tuple of encoders encodes a tuple of values left to right.
macro_rules! tuple_input {
    ($($enc:ident $val:ident $idx:tt),+) => {
        impl<$($val,)+ $($enc: Input<$val>,)+> Input<($($val,)+)> for ($($enc,)+) {
            fn encode<Codec: BinaryCodec>(
                &self,
                codec: &Codec,
                value: &($($val,)+),
            ) -> Result<WireArgs, CodecError> {
                let mut args = WireArgs::empty();
                $( args.extend(self.$idx.encode(codec, &value.$idx)?); )+
                Ok(args)
            }
        }
    };
}

tuple_input!(IA A 0, IB B 1);
tuple_input!(IA A 0, IB B 1, IC C 2);
tuple_input!(IA A 0, IB B 1, IC C 2, ID D 3);
tuple_input!(IA A 0, IB B 1, IC C 2, ID D 3, IE E 4);
tuple_input!(IA A 0, IB B 1, IC C 2, ID D 3, IE E 4, IF F 5);
tuple_input!(IA A 0, IB B 1, IC C 2, ID D 3, IE E 4, IF F 5, IG G 6);
tuple_input!(IA A 0, IB B 1, IC C 2, ID D 3, IE E 4, IF F 5, IG G 6, IH H 7);
tuple_input!(IA A 0, IB B 1, IC C 2, ID D 3, IE E 4, IF F 5, IG G 6, IH H 7, II I 8);
tuple_input!(IA A 0, IB B 1, IC C 2, ID D 3, IE E 4, IF F 5, IG G 6, IH H 7, II I 8, IJ J 9);
tuple_input!(IA A 0, IB B 1, IC C 2, ID D 3, IE E 4, IF F 5, IG G 6, IH H 7, II I 8, IJ J 9, IK K 10);
