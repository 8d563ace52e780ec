//! Typed Redis protocol layer
//!
//! This module turns typed arguments into RESP requests and RESP replies
//! back into typed results. The pieces, from the bottom up:
//!
//! - [`token`]: request tokens and the ordered request they form
//! - [`input`]: argument encoders and their combinators
//! - [`output`]: reply decoders
//! - [`command`]: a name, an encoder and a decoder run against an executor
//! - [`builder`]: commands whose element type is chosen at the call site
//! - [`resp`]: RESP values and the reply parser

pub mod builder;
pub mod command;
pub mod input;
pub mod output;
pub mod resp;
pub mod token;

pub use builder::{Many, Maybe, Pairs, ResultBuilder1, ResultBuilder2, Scan, Scored, Shape, Shape2};
pub use command::Command;
pub use input::Input;
pub use output::Output;
pub use resp::{Parser, Value};
pub use token::{WireArgs, WireToken};
