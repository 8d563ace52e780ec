use derive_more::Constructor;
use serde::Serialize;

use crate::codec::BinaryCodec;
use crate::error::CodecError;
use crate::protocol::input::{Input, format_double};
use crate::protocol::token::{WireArgs, WireToken};

/// One end of a lexicographical range
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexBound {
    Unbounded,
    Open(String),
    Closed(String),
}

impl LexBound {
    fn render(&self, unbounded: &'static str) -> String {
        match self {
            LexBound::Unbounded => unbounded.to_string(),
            LexBound::Open(value) => format!("({}", value),
            LexBound::Closed(value) => format!("[{}", value),
        }
    }
}

/// Lexicographical range, rendered as `[a (z`, `- +` and so on
#[derive(Debug, Clone, PartialEq, Eq, Constructor)]
pub struct LexRange {
    pub min: LexBound,
    pub max: LexBound,
}

impl LexRange {
    pub fn render_min(&self) -> String {
        self.min.render("-")
    }

    pub fn render_max(&self) -> String {
        self.max.render("+")
    }
}

/// One end of a score range
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreBound {
    Infinity,
    Open(f64),
    Closed(f64),
}

impl ScoreBound {
    fn render(&self, infinity: &'static str) -> String {
        match self {
            ScoreBound::Infinity => infinity.to_string(),
            ScoreBound::Open(score) => format!("({}", format_double(*score)),
            ScoreBound::Closed(score) => format_double(*score),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Constructor)]
pub struct ScoreRange {
    pub min: ScoreBound,
    pub max: ScoreBound,
}

impl ScoreRange {
    pub fn render_min(&self) -> String {
        self.min.render("-inf")
    }

    pub fn render_max(&self) -> String {
        self.max.render("+inf")
    }
}

/// A sorted-set member with its score
#[derive(Debug, Clone, PartialEq, Constructor)]
pub struct MemberScore<M> {
    pub score: f64,
    pub member: M,
}

/// `CH`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Changed;

/// `INCR`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Increment;

/// `WITHSCORES`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithScores;

/// `AGGREGATE <SUM|MIN|MAX>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregate {
    Sum,
    Min,
    Max,
}

impl Aggregate {
    pub fn keyword(&self) -> &'static str {
        match self {
            Aggregate::Sum => "SUM",
            Aggregate::Min => "MIN",
            Aggregate::Max => "MAX",
        }
    }
}

/// `WEIGHTS <w1> <w2> ...`, at least one weight
#[derive(Debug, Clone, PartialEq)]
pub struct Weights {
    first: f64,
    rest: Vec<f64>,
}

impl Weights {
    pub fn new(first: f64, rest: impl IntoIterator<Item = f64>) -> Self {
        Self {
            first,
            rest: rest.into_iter().collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        std::iter::once(self.first).chain(self.rest.iter().copied())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LexRangeInput;

impl Input<LexRange> for LexRangeInput {
    fn encode<C: BinaryCodec>(&self, _codec: &C, value: &LexRange) -> Result<WireArgs, CodecError> {
        Ok(WireArgs::opaque(value.render_min()).concat(WireArgs::opaque(value.render_max())))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreRangeInput;

impl Input<ScoreRange> for ScoreRangeInput {
    fn encode<C: BinaryCodec>(&self, _codec: &C, value: &ScoreRange) -> Result<WireArgs, CodecError> {
        Ok(WireArgs::opaque(value.render_min()).concat(WireArgs::opaque(value.render_max())))
    }
}

/// `<score> <member>`; the member goes through the codec as a value
#[derive(Debug, Clone, Copy, Default)]
pub struct MemberScoreInput;

impl<M: Serialize> Input<MemberScore<M>> for MemberScoreInput {
    fn encode<C: BinaryCodec>(
        &self,
        codec: &C,
        value: &MemberScore<M>,
    ) -> Result<WireArgs, CodecError> {
        let mut args = WireArgs::opaque(format_double(value.score));
        args.push(WireToken::Value(codec.encode(&value.member)?));
        Ok(args)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ChangedInput;

impl Input<Changed> for ChangedInput {
    fn encode<C: BinaryCodec>(&self, _codec: &C, _value: &Changed) -> Result<WireArgs, CodecError> {
        Ok(WireArgs::literal("CH"))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IncrementInput;

impl Input<Increment> for IncrementInput {
    fn encode<C: BinaryCodec>(&self, _codec: &C, _value: &Increment) -> Result<WireArgs, CodecError> {
        Ok(WireArgs::literal("INCR"))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WithScoresInput;

impl Input<WithScores> for WithScoresInput {
    fn encode<C: BinaryCodec>(&self, _codec: &C, _value: &WithScores) -> Result<WireArgs, CodecError> {
        Ok(WireArgs::literal("WITHSCORES"))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AggregateInput;

impl Input<Aggregate> for AggregateInput {
    fn encode<C: BinaryCodec>(&self, _codec: &C, value: &Aggregate) -> Result<WireArgs, CodecError> {
        Ok(WireArgs::literal("AGGREGATE").concat(WireArgs::literal(value.keyword())))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WeightsInput;

impl Input<Weights> for WeightsInput {
    fn encode<C: BinaryCodec>(&self, _codec: &C, value: &Weights) -> Result<WireArgs, CodecError> {
        let mut args = WireArgs::literal("WEIGHTS");
        for weight in value.iter() {
            args.push(WireToken::Opaque(format_double(weight)));
        }
        Ok(args)
    }
}
