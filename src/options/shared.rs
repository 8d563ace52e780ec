use std::ops::RangeInclusive;

use derive_more::{Constructor, From};

use crate::codec::BinaryCodec;
use crate::error::CodecError;
use crate::protocol::input::Input;
use crate::protocol::token::WireArgs;

/// `COUNT <n>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, From)]
pub struct Count(pub u64);

/// `MATCH <pattern>`
#[derive(Debug, Clone, PartialEq, Eq, From)]
pub struct Pattern(pub String);

impl From<&str> for Pattern {
    fn from(s: &str) -> Self {
        Pattern(s.to_string())
    }
}

/// `LIMIT <offset> <count>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Constructor)]
pub struct Limit {
    pub offset: i64,
    pub count: i64,
}

/// Conditional update flags for sorted-set writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update {
    /// `XX`: only touch members that already exist
    SetExisting,
    /// `NX`: only add new members
    SetNew,
    /// `LT`
    SetLessThan,
    /// `GT`
    SetGreaterThan,
}

impl Update {
    pub fn keyword(&self) -> &'static str {
        match self {
            Update::SetExisting => "XX",
            Update::SetNew => "NX",
            Update::SetLessThan => "LT",
            Update::SetGreaterThan => "GT",
        }
    }
}

/// Existence condition for plain key writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Existence {
    /// `NX`
    NotExists,
    /// `XX`
    Exists,
}

impl Existence {
    pub fn keyword(&self) -> &'static str {
        match self {
            Existence::NotExists => "NX",
            Existence::Exists => "XX",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CountInput;

impl Input<Count> for CountInput {
    fn encode<C: BinaryCodec>(&self, _codec: &C, value: &Count) -> Result<WireArgs, CodecError> {
        Ok(WireArgs::literal("COUNT").concat(WireArgs::opaque(value.0)))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PatternInput;

impl Input<Pattern> for PatternInput {
    fn encode<C: BinaryCodec>(&self, _codec: &C, value: &Pattern) -> Result<WireArgs, CodecError> {
        Ok(WireArgs::literal("MATCH").concat(WireArgs::opaque(&value.0)))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LimitInput;

impl Input<Limit> for LimitInput {
    fn encode<C: BinaryCodec>(&self, _codec: &C, value: &Limit) -> Result<WireArgs, CodecError> {
        Ok(WireArgs::literal("LIMIT")
            .concat(WireArgs::opaque(value.offset))
            .concat(WireArgs::opaque(value.count)))
    }
}

/// Index range as `<start> <end>`, both inclusive
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeInput;

impl Input<RangeInclusive<i64>> for RangeInput {
    fn encode<C: BinaryCodec>(
        &self,
        _codec: &C,
        value: &RangeInclusive<i64>,
    ) -> Result<WireArgs, CodecError> {
        Ok(WireArgs::opaque(value.start()).concat(WireArgs::opaque(value.end())))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateInput;

impl Input<Update> for UpdateInput {
    fn encode<C: BinaryCodec>(&self, _codec: &C, value: &Update) -> Result<WireArgs, CodecError> {
        Ok(WireArgs::literal(value.keyword()))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExistenceInput;

impl Input<Existence> for ExistenceInput {
    fn encode<C: BinaryCodec>(&self, _codec: &C, value: &Existence) -> Result<WireArgs, CodecError> {
        Ok(WireArgs::literal(value.keyword()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::TextCodec;
    use crate::protocol::input::OptionalInput;
    use crate::protocol::token::WireToken;

    #[test]
    fn test_keywords_precede_values() {
        let codec = TextCodec;
        assert_eq!(
            CountInput.encode(&codec, &Count(10)).unwrap().to_strings(),
            vec!["COUNT", "10"]
        );
        assert_eq!(
            PatternInput.encode(&codec, &Pattern::from("user:*")).unwrap().to_strings(),
            vec!["MATCH", "user:*"]
        );
        assert_eq!(
            LimitInput.encode(&codec, &Limit::new(5, 20)).unwrap().to_strings(),
            vec!["LIMIT", "5", "20"]
        );
    }

    #[test]
    fn test_keywords_are_literal_tokens() {
        let encoded = CountInput.encode(&TextCodec, &Count(1)).unwrap();
        assert_eq!(encoded.tokens()[0], WireToken::Literal("COUNT"));
        assert_eq!(encoded.tokens()[1], WireToken::Opaque("1".to_string()));
    }

    #[test]
    fn test_range() {
        let encoded = RangeInput.encode(&TextCodec, &(0..=-1)).unwrap();
        assert_eq!(encoded.to_strings(), vec!["0", "-1"]);
    }

    #[test]
    fn test_update_and_existence() {
        let codec = TextCodec;
        let rendered: Vec<String> = [
            Update::SetExisting,
            Update::SetNew,
            Update::SetLessThan,
            Update::SetGreaterThan,
        ]
        .iter()
        .map(|u| UpdateInput.encode(&codec, u).unwrap().to_string())
        .collect();
        assert_eq!(rendered, vec!["XX", "NX", "LT", "GT"]);

        assert_eq!(
            ExistenceInput.encode(&codec, &Existence::NotExists).unwrap().to_strings(),
            vec!["NX"]
        );
        assert!(
            OptionalInput(ExistenceInput)
                .encode(&codec, &None)
                .unwrap()
                .is_empty()
        );
    }
}
