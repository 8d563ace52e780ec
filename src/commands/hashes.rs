use serde::Serialize;

use crate::client::Client;
use crate::codec::BinaryCodec;
use crate::error::Result;
use crate::executor::Executor;
use crate::protocol::input::{KeyInput, ValueInput};
use crate::protocol::output::LongOutput;
use crate::protocol::{Maybe, Pairs, ResultBuilder1, ResultBuilder2};

impl<E: Executor, C: BinaryCodec> Client<E, C> {
    /// Set one field, returning 1 if the field is new
    pub async fn hset<K, F, V>(&self, key: &K, field: &F, value: &V) -> Result<i64>
    where
        K: Serialize + ?Sized,
        F: Serialize + ?Sized,
        V: Serialize + ?Sized,
    {
        self.command("HSET", (KeyInput, ValueInput, ValueInput), LongOutput)
            .run(&(key, field, value))
            .await
    }

    pub fn hget<'a, K, F>(
        &'a self,
        key: &'a K,
        field: &'a F,
    ) -> ResultBuilder1<'a, Maybe, (KeyInput, ValueInput), (&'a K, &'a F), C, E>
    where
        K: Serialize + ?Sized,
        F: Serialize + ?Sized,
    {
        self.builder("HGET", (KeyInput, ValueInput), (key, field))
    }

    /// All fields and values; pick both types with `returning::<F, V>()`
    pub fn hgetall<'a, K: Serialize + ?Sized>(
        &'a self,
        key: &'a K,
    ) -> ResultBuilder2<'a, Pairs, KeyInput, &'a K, C, E> {
        self.builder2("HGETALL", KeyInput, key)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::client::Client;
    use crate::executor::StubExecutor;
    use crate::protocol::Value;

    #[tokio::test]
    async fn test_hset_hget() {
        let client = Client::with_text_codec(StubExecutor::with_replies([
            Value::Integer(1),
            Value::bulk("42"),
        ]));

        assert_eq!(client.hset("h", "f", &42).await.unwrap(), 1);
        assert_eq!(client.hget("h", "f").returning::<u8>().await.unwrap(), Some(42));
        assert_eq!(
            client.executor().requests()[0].to_strings(),
            vec!["HSET", "h", "f", "42"]
        );
    }

    #[tokio::test]
    async fn test_hgetall_two_types() {
        let reply = Value::array([
            Value::bulk("a"),
            Value::bulk("1"),
            Value::bulk("b"),
            Value::bulk("2"),
        ]);
        let client =
            Client::with_text_codec(StubExecutor::with_replies([reply.clone(), reply]));

        let builder = client.hgetall("h");
        let numbers: HashMap<String, i64> = builder
            .returning::<String, i64>()
            .await
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(numbers.get("b"), Some(&2));

        let texts = builder.returning::<String, String>().await.unwrap();
        assert_eq!(texts[0], ("a".to_string(), "1".to_string()));
    }
}
