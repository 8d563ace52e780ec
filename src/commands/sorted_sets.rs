use std::ops::RangeInclusive;

use serde::Serialize;

use crate::client::Client;
use crate::codec::BinaryCodec;
use crate::error::Result;
use crate::executor::Executor;
use crate::options::{
    Aggregate, AggregateInput, Changed, ChangedInput, Increment, IncrementInput, LexRange, LexRangeInput, Limit, LimitInput,
    MemberScore, MemberScoreInput, RangeInput, ScoreRange, ScoreRangeInput, Update, UpdateInput,
    Weights, WeightsInput, WithScores, WithScoresInput,
};
use crate::protocol::input::{
    DoubleInput, KeyInput, LongInput, NonEmptyList, OptionalInput, ValueInput,
};
use crate::protocol::output::{DoubleOutput, LongOutput, OptionalOutput};
use crate::protocol::{Many, ResultBuilder1, Scored};

type ZRangeByScoreInput = (KeyInput, ScoreRangeInput, OptionalInput<LimitInput>);
type ZRangeByLexInput = (KeyInput, LexRangeInput, OptionalInput<LimitInput>);

impl<E: Executor, C: BinaryCodec> Client<E, C> {
    /// Add or update members, returning the number added (or changed with `CH`)
    pub async fn zadd<K, M>(
        &self,
        key: &K,
        update: Option<Update>,
        change: Option<Changed>,
        member: &MemberScore<M>,
        members: &[MemberScore<M>],
    ) -> Result<i64>
    where
        K: Serialize + ?Sized,
        M: Serialize,
    {
        self.command(
            "ZADD",
            (
                KeyInput,
                OptionalInput(UpdateInput),
                OptionalInput(ChangedInput),
                NonEmptyList(MemberScoreInput),
            ),
            LongOutput,
        )
        .run(&(key, update, change, (member, members)))
        .await
    }

    /// `ZADD ... INCR`; `None` when an `NX`/`XX` condition skipped the member
    pub async fn zadd_incr<K, M>(
        &self,
        key: &K,
        update: Option<Update>,
        member: MemberScore<M>,
    ) -> Result<Option<f64>>
    where
        K: Serialize + ?Sized,
        M: Serialize,
    {
        self.command(
            "ZADD",
            (KeyInput, OptionalInput(UpdateInput), IncrementInput, MemberScoreInput),
            OptionalOutput(DoubleOutput),
        )
        .run(&(key, update, Increment, member))
        .await
    }

    /// Increment a member's score, returning the new score
    pub async fn zincrby<K, M>(&self, key: &K, increment: f64, member: &M) -> Result<f64>
    where
        K: Serialize + ?Sized,
        M: Serialize + ?Sized,
    {
        self.command("ZINCRBY", (KeyInput, DoubleInput, ValueInput), DoubleOutput)
            .run(&(key, increment, member))
            .await
    }

    /// Score of a member, `None` if either the key or the member is missing
    pub async fn zscore<K, M>(&self, key: &K, member: &M) -> Result<Option<f64>>
    where
        K: Serialize + ?Sized,
        M: Serialize + ?Sized,
    {
        self.command("ZSCORE", (KeyInput, ValueInput), OptionalOutput(DoubleOutput))
            .run(&(key, member))
            .await
    }

    pub async fn zcard<K: Serialize + ?Sized>(&self, key: &K) -> Result<i64> {
        self.command("ZCARD", KeyInput, LongOutput).run(key).await
    }

    pub async fn zcount<K: Serialize + ?Sized>(&self, key: &K, range: ScoreRange) -> Result<i64> {
        self.command("ZCOUNT", (KeyInput, ScoreRangeInput), LongOutput)
            .run(&(key, range))
            .await
    }

    /// Members by index range
    pub fn zrange<'a, K: Serialize + ?Sized>(
        &'a self,
        key: &'a K,
        range: RangeInclusive<i64>,
    ) -> ResultBuilder1<'a, Many, (KeyInput, RangeInput), (&'a K, RangeInclusive<i64>), C, E> {
        self.builder("ZRANGE", (KeyInput, RangeInput), (key, range))
    }

    /// Members and scores by index range
    pub fn zrange_with_scores<'a, K: Serialize + ?Sized>(
        &'a self,
        key: &'a K,
        range: RangeInclusive<i64>,
    ) -> ResultBuilder1<
        'a,
        Scored,
        (KeyInput, RangeInput, WithScoresInput),
        (&'a K, RangeInclusive<i64>, WithScores),
        C,
        E,
    > {
        self.builder(
            "ZRANGE",
            (KeyInput, RangeInput, WithScoresInput),
            (key, range, WithScores),
        )
    }

    pub fn zrange_by_score<'a, K: Serialize + ?Sized>(
        &'a self,
        key: &'a K,
        range: ScoreRange,
        limit: Option<Limit>,
    ) -> ResultBuilder1<'a, Many, ZRangeByScoreInput, (&'a K, ScoreRange, Option<Limit>), C, E> {
        self.builder(
            "ZRANGEBYSCORE",
            (KeyInput, ScoreRangeInput, OptionalInput(LimitInput)),
            (key, range, limit),
        )
    }

    pub fn zrange_by_lex<'a, K: Serialize + ?Sized>(
        &'a self,
        key: &'a K,
        range: LexRange,
        limit: Option<Limit>,
    ) -> ResultBuilder1<'a, Many, ZRangeByLexInput, (&'a K, LexRange, Option<Limit>), C, E> {
        self.builder(
            "ZRANGEBYLEX",
            (KeyInput, LexRangeInput, OptionalInput(LimitInput)),
            (key, range, limit),
        )
    }

    /// Union of sorted sets stored at `destination`, returning its size
    pub async fn zunionstore<D, K>(
        &self,
        destination: &D,
        key: &K,
        keys: &[K],
        weights: Option<Weights>,
        aggregate: Option<Aggregate>,
    ) -> Result<i64>
    where
        D: Serialize + ?Sized,
        K: Serialize,
    {
        let numkeys = keys.len() + 1;
        self.command(
            "ZUNIONSTORE",
            (
                KeyInput,
                LongInput,
                NonEmptyList(KeyInput),
                OptionalInput(WeightsInput),
                OptionalInput(AggregateInput),
            ),
            LongOutput,
        )
        .run(&(destination, numkeys, (key, keys), weights, aggregate))
        .await
    }
}
