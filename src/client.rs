use std::borrow::Cow;

use crate::codec::{BinaryCodec, TextCodec};
use crate::executor::Executor;
use crate::protocol::output::Output;
use crate::protocol::{Command, Input, ResultBuilder1, ResultBuilder2, Shape, Shape2};

/// Handle pairing one executor with one binary codec
///
/// Every command wrapper in [`crate::commands`] is a method on this type.
pub struct Client<E, C = TextCodec> {
    executor: E,
    codec: C,
}

impl<E: Executor> Client<E, TextCodec> {
    /// Create a client using the plain text codec
    pub fn with_text_codec(executor: E) -> Self {
        Self::new(executor, TextCodec)
    }
}

impl<E: Executor, C: BinaryCodec> Client<E, C> {
    pub fn new(executor: E, codec: C) -> Self {
        Self { executor, codec }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Bind a command to this client's codec and executor
    pub fn command<I, O: Output>(
        &self,
        name: impl Into<Cow<'static, str>>,
        input: I,
        output: O,
    ) -> Command<'_, I, O, C, E> {
        Command::new(name, input, output, &self.codec, &self.executor)
    }

    /// Capture fixed arguments; the element type is chosen later
    pub fn builder<S: Shape, I: Input<A>, A>(
        &self,
        name: impl Into<Cow<'static, str>>,
        input: I,
        args: A,
    ) -> ResultBuilder1<'_, S, I, A, C, E> {
        ResultBuilder1::new(name, input, args, &self.codec, &self.executor)
    }

    pub fn builder2<S: Shape2, I: Input<A>, A>(
        &self,
        name: impl Into<Cow<'static, str>>,
        input: I,
        args: A,
    ) -> ResultBuilder2<'_, S, I, A, C, E> {
        ResultBuilder2::new(name, input, args, &self.codec, &self.executor)
    }
}
