use std::borrow::Cow;

use tracing::{debug, trace, warn};

use crate::codec::BinaryCodec;
use crate::error::{Error, Result};
use crate::executor::Executor;
use crate::protocol::input::Input;
use crate::protocol::output::Output;
use crate::protocol::resp::Value;
use crate::protocol::token::WireArgs;

/// A command name bound to its argument encoder and reply decoder
///
/// Commands hold no state between runs and are cheap to build, so wrappers
/// usually create one per call.
pub struct Command<'a, I, O, C, E: ?Sized> {
    name: Cow<'static, str>,
    input: I,
    output: O,
    codec: &'a C,
    executor: &'a E,
}

impl<'a, I, O, C, E> Command<'a, I, O, C, E>
where
    O: Output,
    C: BinaryCodec,
    E: Executor + ?Sized,
{
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        input: I,
        output: O,
        codec: &'a C,
        executor: &'a E,
    ) -> Self {
        Self {
            name: name.into(),
            input,
            output,
            codec,
            executor,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Encode `args` and put the command name in front
    pub fn encode<A: ?Sized>(&self, args: &A) -> Result<WireArgs>
    where
        I: Input<A>,
    {
        Ok(self.input.encode(self.codec, args)?.with_name(self.name.clone()))
    }

    /// Encode, send and decode
    pub async fn run<A: ?Sized>(&self, args: &A) -> Result<O::Target>
    where
        I: Input<A>,
    {
        let request = self.encode(args)?;
        debug!("Sending {} with {} arguments", self.name, request.len() - 1);

        let reply = self.executor.execute(request).await?;
        trace!("Reply to {}: {:?}", self.name, reply);

        if let Value::Error(msg) = reply {
            warn!("Server rejected {}: {}", self.name, msg);
            return Err(Error::Server(msg));
        }

        self.output.decode(self.codec, reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::TextCodec;
    use crate::executor::StubExecutor;
    use crate::protocol::input::{KeyInput, LongInput, NonEmptyList, ValueInput};
    use crate::protocol::output::{LongOutput, OptionalOutput, DoubleOutput};
    use crate::protocol::token::WireToken;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_run_attaches_name_and_decodes() {
        let stub = StubExecutor::with_replies([Value::Integer(2)]);
        let codec = TextCodec;
        let cmd = Command::new("SADD", (KeyInput, NonEmptyList(ValueInput)), LongOutput, &codec, &stub);

        let tail = ["b"];
        let added = cmd.run(&("s", (&"a", &tail[..]))).await.unwrap();
        assert_eq!(added, 2);

        let request = stub.last_request().unwrap();
        assert_eq!(request.to_strings(), vec!["SADD", "s", "a", "b"]);
        assert_eq!(request.tokens()[0], WireToken::Name("SADD".into()));
        assert!(request.tokens()[1].is_key());
    }

    #[tokio::test]
    async fn test_server_error_is_passed_through() {
        let stub = StubExecutor::with_replies([Value::error("WRONGTYPE Operation against a key")]);
        let codec = TextCodec;
        let cmd = Command::new("SCARD", KeyInput, LongOutput, &codec, &stub);

        let err = cmd.run("s").await.unwrap_err();
        assert!(matches!(err, Error::Server(msg) if msg.starts_with("WRONGTYPE")));
    }

    #[tokio::test]
    async fn test_wrong_shape_is_decode_error() {
        let stub = StubExecutor::with_replies([Value::bulk("nope")]);
        let codec = TextCodec;
        let cmd = Command::new("SCARD", KeyInput, LongOutput, &codec, &stub);

        let err = cmd.run("s").await.unwrap_err();
        assert!(err.is_decode());
    }

    #[tokio::test]
    async fn test_nil_through_optional_double() {
        let stub = StubExecutor::with_replies([Value::BulkString(None)]);
        let codec = TextCodec;
        let cmd = Command::new(
            "ZSCORE",
            (KeyInput, ValueInput),
            OptionalOutput(DoubleOutput),
            &codec,
            &stub,
        );

        assert_eq!(cmd.run(&("z", "m")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_command_is_reusable_concurrently() {
        let stub = Arc::new(StubExecutor::with_replies((0..8).map(Value::Integer)));
        let codec = TextCodec;
        let cmd = Command::new("INCRBY", (KeyInput, LongInput), LongOutput, &codec, &stub);

        let runs = (0..8i64).map(|i| {
            let cmd = &cmd;
            async move { cmd.run(&("counter", i)).await }
        });
        let results = futures::future::join_all(runs).await;

        let mut replies: Vec<i64> = results.into_iter().map(|r| r.unwrap()).collect();
        replies.sort();
        assert_eq!(replies, (0..8).collect::<Vec<_>>());

        let mut sent: Vec<String> = stub.requests().iter().map(|r| r.to_string()).collect();
        sent.sort();
        let mut expected: Vec<String> = (0..8).map(|i| format!("INCRBY counter {}", i)).collect();
        expected.sort();
        assert_eq!(sent, expected);
    }
}
