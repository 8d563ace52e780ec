use std::time::Duration;

use serde::Serialize;

use crate::client::Client;
use crate::codec::BinaryCodec;
use crate::error::Result;
use crate::executor::Executor;
use crate::options::{ExpiredAt, ExpiredAtInput};
use crate::protocol::input::{
    DurationMillisecondsInput, DurationSecondsInput, KeyInput, NonEmptyList,
};
use crate::protocol::output::{BoolOutput, LongOutput, Output};

impl<E: Executor, C: BinaryCodec> Client<E, C> {
    /// Delete keys, returning how many existed
    pub async fn del<K: Serialize>(&self, key: &K, keys: &[K]) -> Result<i64> {
        self.command("DEL", NonEmptyList(KeyInput), LongOutput)
            .run(&(key, keys))
            .await
    }

    /// Count how many of the given keys exist
    pub async fn exists<K: Serialize>(&self, key: &K, keys: &[K]) -> Result<i64> {
        self.command("EXISTS", NonEmptyList(KeyInput), LongOutput)
            .run(&(key, keys))
            .await
    }

    /// Set a timeout in whole seconds; sub-second parts are dropped
    pub async fn expire<K: Serialize + ?Sized>(&self, key: &K, timeout: Duration) -> Result<bool> {
        self.command("EXPIRE", (KeyInput, DurationSecondsInput), BoolOutput)
            .run(&(key, timeout))
            .await
    }

    pub async fn pexpire<K: Serialize + ?Sized>(&self, key: &K, timeout: Duration) -> Result<bool> {
        self.command("PEXPIRE", (KeyInput, DurationMillisecondsInput), BoolOutput)
            .run(&(key, timeout))
            .await
    }

    /// Expire at an absolute time, as `EXPIREAT` or `PEXPIREAT` depending on resolution
    pub async fn expire_at<K: Serialize + ?Sized>(&self, key: &K, at: ExpiredAt) -> Result<bool> {
        self.command(at.command_name(), (KeyInput, ExpiredAtInput), BoolOutput)
            .run(&(key, at))
            .await
    }

    /// Remaining time to live
    ///
    /// `None` covers both a missing key and a key without expiry.
    pub async fn ttl<K: Serialize + ?Sized>(&self, key: &K) -> Result<Option<Duration>> {
        let output = LongOutput.map(|secs| u64::try_from(secs).ok().map(Duration::from_secs));
        self.command("TTL", KeyInput, output).run(key).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, UNIX_EPOCH};

    use crate::client::Client;
    use crate::executor::StubExecutor;
    use crate::options::ExpiredAt;
    use crate::protocol::Value;

    fn sent(client: &Client<StubExecutor>) -> Vec<String> {
        client
            .executor()
            .requests()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[tokio::test]
    async fn test_del_and_exists() {
        let client = Client::with_text_codec(StubExecutor::with_replies([
            Value::Integer(2),
            Value::Integer(1),
        ]));

        assert_eq!(client.del(&"a", &["b"]).await.unwrap(), 2);
        assert_eq!(client.exists(&"a", &[]).await.unwrap(), 1);

        let request = client.executor().requests().remove(0);
        assert_eq!(request.keys().count(), 2);
        assert_eq!(sent(&client), vec!["DEL a b", "EXISTS a"]);
    }

    #[tokio::test]
    async fn test_expire_floors_to_seconds() {
        let client = Client::with_text_codec(StubExecutor::with_replies([
            Value::Integer(1),
            Value::Integer(0),
        ]));

        assert!(client.expire("k", Duration::from_millis(1500)).await.unwrap());
        assert!(!client.pexpire("k", Duration::from_millis(1500)).await.unwrap());
        assert_eq!(sent(&client), vec!["EXPIRE k 1", "PEXPIRE k 1500"]);
    }

    #[tokio::test]
    async fn test_expire_at_resolution_selects_command() {
        let client = Client::with_text_codec(StubExecutor::with_replies([
            Value::Integer(1),
            Value::Integer(1),
        ]));
        let at = UNIX_EPOCH + Duration::from_millis(1_700_000_000_250);

        client.expire_at("k", ExpiredAt::Seconds(at)).await.unwrap();
        client.expire_at("k", ExpiredAt::Milliseconds(at)).await.unwrap();
        assert_eq!(
            sent(&client),
            vec!["EXPIREAT k 1700000000", "PEXPIREAT k 1700000000250"]
        );
    }

    #[tokio::test]
    async fn test_ttl() {
        let client = Client::with_text_codec(StubExecutor::with_replies([
            Value::Integer(30),
            Value::Integer(-1),
            Value::Integer(-2),
        ]));

        assert_eq!(client.ttl("k").await.unwrap(), Some(Duration::from_secs(30)));
        assert_eq!(client.ttl("k").await.unwrap(), None);
        assert_eq!(client.ttl("k").await.unwrap(), None);
    }
}
