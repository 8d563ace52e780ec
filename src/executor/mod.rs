//! Executors send an encoded request and hand back the raw reply
//!
//! The protocol layer only needs "send these arguments, give me the reply";
//! how the round trip is scheduled is up to the executor.

pub mod stub;
pub mod tcp;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::protocol::resp::Value;
use crate::protocol::token::WireArgs;

pub use stub::StubExecutor;
pub use tcp::TcpExecutor;

/// Transmits one request and returns its raw reply
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute(&self, args: WireArgs) -> Result<Value>;
}

#[async_trait]
impl<E: Executor + ?Sized> Executor for Arc<E> {
    async fn execute(&self, args: WireArgs) -> Result<Value> {
        (**self).execute(args).await
    }
}

#[async_trait]
impl<'a, E: Executor + ?Sized> Executor for &'a E {
    async fn execute(&self, args: WireArgs) -> Result<Value> {
        (**self).execute(args).await
    }
}
