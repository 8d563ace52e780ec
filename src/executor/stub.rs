use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::executor::Executor;
use crate::protocol::resp::Value;
use crate::protocol::token::WireArgs;

/// Executor that answers from a script and remembers what it was sent
///
/// Replies are handed out in the order they were queued. Once the script is
/// exhausted every request fails with an I/O error.
#[derive(Default)]
pub struct StubExecutor {
    replies: Mutex<VecDeque<Value>>,
    requests: Mutex<Vec<WireArgs>>,
}

impl StubExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an executor with the given replies already queued
    pub fn with_replies(replies: impl IntoIterator<Item = Value>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue one more reply
    pub fn push_reply(&self, reply: Value) {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(reply);
    }

    /// Every request received so far, oldest first
    pub fn requests(&self) -> Vec<WireArgs> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent request
    pub fn last_request(&self) -> Option<WireArgs> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

#[async_trait]
impl Executor for StubExecutor {
    async fn execute(&self, args: WireArgs) -> Result<Value> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(args);

        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .ok_or_else(|| {
                Error::Io(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "no scripted reply left",
                ))
            })
    }
}
