use serde::Serialize;

use crate::client::Client;
use crate::codec::BinaryCodec;
use crate::error::Result;
use crate::executor::Executor;
use crate::options::{Existence, ExistenceInput, Expire, ExpireInput};
use crate::protocol::input::{KeyInput, LongInput, OptionalInput, ValueInput};
use crate::protocol::output::{LongOutput, OptionalOutput, Output, UnitOutput};
use crate::protocol::{Maybe, ResultBuilder1};

impl<E: Executor, C: BinaryCodec> Client<E, C> {
    /// Store a value; returns `false` when an `NX`/`XX` condition prevented the write
    pub async fn set<K, V>(
        &self,
        key: &K,
        value: &V,
        expire: Option<Expire>,
        existence: Option<Existence>,
    ) -> Result<bool>
    where
        K: Serialize + ?Sized,
        V: Serialize + ?Sized,
    {
        self.command(
            "SET",
            (
                KeyInput,
                ValueInput,
                OptionalInput(ExpireInput),
                OptionalInput(ExistenceInput),
            ),
            OptionalOutput(UnitOutput).map(|written| written.is_some()),
        )
        .run(&(key, value, expire, existence))
        .await
    }

    pub fn get<'a, K: Serialize + ?Sized>(
        &'a self,
        key: &'a K,
    ) -> ResultBuilder1<'a, Maybe, KeyInput, &'a K, C, E> {
        self.builder("GET", KeyInput, key)
    }

    pub async fn incr_by<K: Serialize + ?Sized>(&self, key: &K, increment: i64) -> Result<i64> {
        self.command("INCRBY", (KeyInput, LongInput), LongOutput)
            .run(&(key, increment))
            .await
    }
}
