//! Typed protocol layer for a Redis-compatible client
//!
//! Commands are described by an [`Input`](protocol::Input) that turns arguments
//! into tagged wire tokens and an [`Output`](protocol::Output) that turns the
//! reply back into a typed value. A [`Client`] binds both to a codec and an
//! [`Executor`](executor::Executor).

pub mod client;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod executor;
pub mod options;
pub mod protocol;

pub use client::Client;
pub use codec::{BinaryCodec, JsonCodec, TextCodec};
pub use error::{CodecError, Error, Result};
