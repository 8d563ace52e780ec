use serde::Serialize;

use crate::client::Client;
use crate::codec::BinaryCodec;
use crate::error::Result;
use crate::executor::Executor;
use crate::options::{Count, CountInput, Pattern, PatternInput};
use crate::protocol::input::{KeyInput, LongInput, NonEmptyList, OptionalInput, ValueInput};
use crate::protocol::output::{BoolOutput, LongOutput};
use crate::protocol::{Many, ResultBuilder1, Scan};

type SScanInput = (
    KeyInput,
    LongInput,
    OptionalInput<PatternInput>,
    OptionalInput<CountInput>,
);

impl<E: Executor, C: BinaryCodec> Client<E, C> {
    /// Add members to a set, returning how many were new
    pub async fn sadd<K, M>(&self, key: &K, member: &M, members: &[M]) -> Result<i64>
    where
        K: Serialize + ?Sized,
        M: Serialize,
    {
        self.command("SADD", (KeyInput, NonEmptyList(ValueInput)), LongOutput)
            .run(&(key, (member, members)))
            .await
    }

    /// Remove members from a set, returning how many were present
    pub async fn srem<K, M>(&self, key: &K, member: &M, members: &[M]) -> Result<i64>
    where
        K: Serialize + ?Sized,
        M: Serialize,
    {
        self.command("SREM", (KeyInput, NonEmptyList(ValueInput)), LongOutput)
            .run(&(key, (member, members)))
            .await
    }

    pub async fn scard<K: Serialize + ?Sized>(&self, key: &K) -> Result<i64> {
        self.command("SCARD", KeyInput, LongOutput).run(key).await
    }

    pub async fn sismember<K, M>(&self, key: &K, member: &M) -> Result<bool>
    where
        K: Serialize + ?Sized,
        M: Serialize + ?Sized,
    {
        self.command("SISMEMBER", (KeyInput, ValueInput), BoolOutput)
            .run(&(key, member))
            .await
    }

    /// All members of a set; pick the member type with `returning::<R>()`
    pub fn smembers<'a, K: Serialize + ?Sized>(
        &'a self,
        key: &'a K,
    ) -> ResultBuilder1<'a, Many, KeyInput, &'a K, C, E> {
        self.builder("SMEMBERS", KeyInput, key)
    }

    /// One page of a cursor-based scan over a set
    pub fn sscan<'a, K: Serialize + ?Sized>(
        &'a self,
        key: &'a K,
        cursor: u64,
        pattern: Option<Pattern>,
        count: Option<Count>,
    ) -> ResultBuilder1<'a, Scan, SScanInput, (&'a K, u64, Option<Pattern>, Option<Count>), C, E> {
        self.builder(
            "SSCAN",
            (
                KeyInput,
                LongInput,
                OptionalInput(PatternInput),
                OptionalInput(CountInput),
            ),
            (key, cursor, pattern, count),
        )
    }
}
