//! Auxiliary value types used as command options
//!
//! Each type has exactly one wire rendering, produced by its matching
//! encoder (`Count` by `CountInput`, `LexRange` by `LexRangeInput`, ...).

pub mod keys;
pub mod shared;
pub mod sorted_sets;

pub use keys::{Expire, ExpireInput, ExpiredAt, ExpiredAtInput};
pub use shared::{
    Count, CountInput, Existence, ExistenceInput, Limit, LimitInput, Pattern, PatternInput,
    RangeInput, Update, UpdateInput,
};
pub use sorted_sets::{
    Aggregate, AggregateInput, Changed, ChangedInput, Increment, IncrementInput, LexBound,
    LexRange, LexRangeInput, MemberScore, MemberScoreInput, ScoreBound, ScoreRange,
    ScoreRangeInput, Weights, WeightsInput, WithScores, WithScoresInput,
};
