//! Commands whose element type is picked by the caller
//!
//! A [`ResultBuilder1`] holds a command name, its encoder and the fixed
//! arguments. Nothing is encoded or sent until [`ResultBuilder1::returning`]
//! names the element type, and the same builder can be finalized any number
//! of times with different types.
//!
//! The container around the element type is described by a [`Shape`]:
//! `Many` yields `Vec<R>`, `Maybe` yields `Option<R>`, and so on.

use std::borrow::Cow;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::codec::BinaryCodec;
use crate::error::Result;
use crate::executor::Executor;
use crate::options::MemberScore;
use crate::protocol::command::Command;
use crate::protocol::input::Input;
use crate::protocol::output::{
    ArbitraryOutput, ChunkOutput, DoubleOutput, Mapped, OptionalOutput, Output, PairsOutput,
    ScanOutput,
};

/// Container shape over one deferred element type
pub trait Shape {
    type Out<R: DeserializeOwned>: Output;

    fn output<R: DeserializeOwned>() -> Self::Out<R>;
}

/// Container shape over two deferred element types
pub trait Shape2 {
    type Out<K: DeserializeOwned, V: DeserializeOwned>: Output;

    fn output<K: DeserializeOwned, V: DeserializeOwned>() -> Self::Out<K, V>;
}

/// Array reply as `Vec<R>`
pub struct Many;

impl Shape for Many {
    type Out<R: DeserializeOwned> = ChunkOutput<ArbitraryOutput<R>>;

    fn output<R: DeserializeOwned>() -> Self::Out<R> {
        ChunkOutput(ArbitraryOutput::new())
    }
}

/// Nullable reply as `Option<R>`
pub struct Maybe;

impl Shape for Maybe {
    type Out<R: DeserializeOwned> = OptionalOutput<ArbitraryOutput<R>>;

    fn output<R: DeserializeOwned>() -> Self::Out<R> {
        OptionalOutput(ArbitraryOutput::new())
    }
}

/// Scan page as `(cursor, Vec<R>)`
pub struct Scan;

impl Shape for Scan {
    type Out<R: DeserializeOwned> = ScanOutput<ArbitraryOutput<R>>;

    fn output<R: DeserializeOwned>() -> Self::Out<R> {
        ScanOutput(ArbitraryOutput::new())
    }
}

/// `WITHSCORES` reply as `Vec<MemberScore<R>>`
pub struct Scored;

type ScoredPairs<R> = PairsOutput<ArbitraryOutput<R>, DoubleOutput>;

fn to_member_scores<R>(pairs: Vec<(R, f64)>) -> Vec<MemberScore<R>> {
    pairs
        .into_iter()
        .map(|(member, score)| MemberScore::new(score, member))
        .collect()
}

impl Shape for Scored {
    type Out<R: DeserializeOwned> = Mapped<ScoredPairs<R>, fn(Vec<(R, f64)>) -> Vec<MemberScore<R>>>;

    fn output<R: DeserializeOwned>() -> Self::Out<R> {
        PairsOutput(ArbitraryOutput::new(), DoubleOutput)
            .map(to_member_scores::<R> as fn(Vec<(R, f64)>) -> Vec<MemberScore<R>>)
    }
}

/// Flat `[k1, v1, k2, v2, ...]` reply as `Vec<(K, V)>`
pub struct Pairs;

impl Shape2 for Pairs {
    type Out<K: DeserializeOwned, V: DeserializeOwned> = PairsOutput<ArbitraryOutput<K>, ArbitraryOutput<V>>;

    fn output<K: DeserializeOwned, V: DeserializeOwned>() -> Self::Out<K, V> {
        PairsOutput(ArbitraryOutput::new(), ArbitraryOutput::new())
    }
}

/// Fixed arguments waiting for one element type
pub struct ResultBuilder1<'a, S, I, A, C, E: ?Sized> {
    name: Cow<'static, str>,
    input: I,
    args: A,
    codec: &'a C,
    executor: &'a E,
    _shape: PhantomData<fn() -> S>,
}

impl<'a, S, I, A, C, E> ResultBuilder1<'a, S, I, A, C, E>
where
    S: Shape,
    I: Input<A>,
    C: BinaryCodec,
    E: Executor + ?Sized,
{
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        input: I,
        args: A,
        codec: &'a C,
        executor: &'a E,
    ) -> Self {
        Self {
            name: name.into(),
            input,
            args,
            codec,
            executor,
            _shape: PhantomData,
        }
    }

    /// Fix the element type, then encode, send and decode
    pub async fn returning<R: DeserializeOwned>(&self) -> Result<<S::Out<R> as Output>::Target> {
        self.returning_with(S::output::<R>()).await
    }

    /// Run with an explicit decoder instead of the shape's default
    pub async fn returning_with<O: Output>(&self, output: O) -> Result<O::Target> {
        Command::new(self.name.clone(), &self.input, output, self.codec, self.executor)
            .run(&self.args)
            .await
    }
}

/// Fixed arguments waiting for two element types
pub struct ResultBuilder2<'a, S, I, A, C, E: ?Sized> {
    inner: ResultBuilder1<'a, Many, I, A, C, E>,
    _shape: PhantomData<fn() -> S>,
}

impl<'a, S, I, A, C, E> ResultBuilder2<'a, S, I, A, C, E>
where
    S: Shape2,
    I: Input<A>,
    C: BinaryCodec,
    E: Executor + ?Sized,
{
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        input: I,
        args: A,
        codec: &'a C,
        executor: &'a E,
    ) -> Self {
        Self {
            inner: ResultBuilder1::new(name, input, args, codec, executor),
            _shape: PhantomData,
        }
    }

    pub async fn returning<K, V>(&self) -> Result<<S::Out<K, V> as Output>::Target>
    where
        K: DeserializeOwned,
        V: DeserializeOwned,
    {
        self.inner.returning_with(S::output::<K, V>()).await
    }
}
