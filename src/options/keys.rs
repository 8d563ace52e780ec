use std::time::{Duration, SystemTime};

use crate::codec::BinaryCodec;
use crate::error::CodecError;
use crate::protocol::input::{
    DurationMillisecondsInput, DurationSecondsInput, Input, TimeMillisecondsInput, TimeSecondsInput,
};
use crate::protocol::token::WireArgs;

/// Expiry attached to a `SET`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expire {
    /// `EX`, relative, whole seconds
    Seconds(Duration),
    /// `PX`, relative, milliseconds
    Milliseconds(Duration),
    /// `EXAT`, absolute Unix time in seconds
    AtSeconds(SystemTime),
    /// `PXAT`, absolute Unix time in milliseconds
    AtMilliseconds(SystemTime),
    /// `KEEPTTL`
    KeepTtl,
}

/// Absolute expiry for `EXPIREAT` / `PEXPIREAT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiredAt {
    Seconds(SystemTime),
    Milliseconds(SystemTime),
}

impl ExpiredAt {
    /// Command that accepts this resolution
    pub fn command_name(&self) -> &'static str {
        match self {
            ExpiredAt::Seconds(_) => "EXPIREAT",
            ExpiredAt::Milliseconds(_) => "PEXPIREAT",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExpireInput;

impl Input<Expire> for ExpireInput {
    fn encode<C: BinaryCodec>(&self, codec: &C, value: &Expire) -> Result<WireArgs, CodecError> {
        let args = match value {
            Expire::Seconds(d) => WireArgs::literal("EX").concat(DurationSecondsInput.encode(codec, d)?),
            Expire::Milliseconds(d) => {
                WireArgs::literal("PX").concat(DurationMillisecondsInput.encode(codec, d)?)
            }
            Expire::AtSeconds(t) => WireArgs::literal("EXAT").concat(TimeSecondsInput.encode(codec, t)?),
            Expire::AtMilliseconds(t) => {
                WireArgs::literal("PXAT").concat(TimeMillisecondsInput.encode(codec, t)?)
            }
            Expire::KeepTtl => WireArgs::literal("KEEPTTL"),
        };
        Ok(args)
    }
}

/// Timestamp only; the keyword lives in the command name
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpiredAtInput;

impl Input<ExpiredAt> for ExpiredAtInput {
    fn encode<C: BinaryCodec>(&self, codec: &C, value: &ExpiredAt) -> Result<WireArgs, CodecError> {
        match value {
            ExpiredAt::Seconds(t) => TimeSecondsInput.encode(codec, t),
            ExpiredAt::Milliseconds(t) => TimeMillisecondsInput.encode(codec, t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::TextCodec;
    use std::time::UNIX_EPOCH;

    #[test]
    fn test_relative_expire_branches() {
        let codec = TextCodec;
        let d = Duration::from_millis(2750);
        assert_eq!(
            ExpireInput.encode(&codec, &Expire::Seconds(d)).unwrap().to_strings(),
            vec!["EX", "2"]
        );
        assert_eq!(
            ExpireInput.encode(&codec, &Expire::Milliseconds(d)).unwrap().to_strings(),
            vec!["PX", "2750"]
        );
        assert_eq!(
            ExpireInput.encode(&codec, &Expire::KeepTtl).unwrap().to_strings(),
            vec!["KEEPTTL"]
        );
    }

    #[test]
    fn test_absolute_expire_branches() {
        let codec = TextCodec;
        let t = UNIX_EPOCH + Duration::from_millis(1_000_500);
        assert_eq!(
            ExpireInput.encode(&codec, &Expire::AtSeconds(t)).unwrap().to_strings(),
            vec!["EXAT", "1000"]
        );
        assert_eq!(
            ExpireInput.encode(&codec, &Expire::AtMilliseconds(t)).unwrap().to_strings(),
            vec!["PXAT", "1000500"]
        );
    }

    #[test]
    fn test_expired_at_picks_command_and_unit() {
        let codec = TextCodec;
        let t = UNIX_EPOCH + Duration::from_millis(1_000_500);

        let at = ExpiredAt::Seconds(t);
        assert_eq!(at.command_name(), "EXPIREAT");
        assert_eq!(ExpiredAtInput.encode(&codec, &at).unwrap().to_strings(), vec!["1000"]);

        let at = ExpiredAt::Milliseconds(t);
        assert_eq!(at.command_name(), "PEXPIREAT");
        assert_eq!(
            ExpiredAtInput.encode(&codec, &at).unwrap().to_strings(),
            vec!["1000500"]
        );
    }
}
