//! Request building blocks
//!
//! A request is an ordered list of [`WireToken`]s. Each token records how its
//! bytes were produced so that routing can pick out the key arguments after
//! the whole request has been assembled.

use std::borrow::Cow;
use std::fmt;

use bytes::Bytes;

use crate::protocol::resp::Value;

/// One argument of a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireToken {
    /// Protocol keyword such as `WITHSCORES` or `LIMIT`
    Literal(&'static str),
    /// Stringified scalar (counts, scores, cursors)
    Opaque(String),
    /// Codec-encoded key name; the only token cluster routing looks at
    Key(Bytes),
    /// Codec-encoded payload
    Value(Bytes),
    /// The command's own wire name
    Name(Cow<'static, str>),
}

impl WireToken {
    /// Bytes sent on the wire for this token
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            WireToken::Literal(s) => s.as_bytes(),
            WireToken::Opaque(s) => s.as_bytes(),
            WireToken::Key(b) | WireToken::Value(b) => b,
            WireToken::Name(s) => s.as_bytes(),
        }
    }

    pub fn is_key(&self) -> bool {
        matches!(self, WireToken::Key(_))
    }
}

impl fmt::Display for WireToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match std::str::from_utf8(self.as_bytes()) {
            Ok(s) => f.write_str(s),
            Err(_) => write!(f, "0x{}", hex::encode(self.as_bytes())),
        }
    }
}

/// An ordered, concatenable request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WireArgs(Vec<WireToken>);

impl WireArgs {
    /// The empty request; identity for [`WireArgs::concat`]
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn single(token: WireToken) -> Self {
        Self(vec![token])
    }

    pub fn literal(keyword: &'static str) -> Self {
        Self::single(WireToken::Literal(keyword))
    }

    pub fn opaque(value: impl ToString) -> Self {
        Self::single(WireToken::Opaque(value.to_string()))
    }

    pub fn push(&mut self, token: WireToken) {
        self.0.push(token);
    }

    /// Append `other` after the tokens already present
    pub fn extend(&mut self, other: WireArgs) {
        self.0.extend(other.0);
    }

    pub fn concat(mut self, other: WireArgs) -> Self {
        self.extend(other);
        self
    }

    /// Place the command name in front of the arguments
    pub fn with_name(self, name: impl Into<Cow<'static, str>>) -> Self {
        let mut tokens = Vec::with_capacity(self.0.len() + 1);
        tokens.push(WireToken::Name(name.into()));
        tokens.extend(self.0);
        Self(tokens)
    }

    pub fn tokens(&self) -> &[WireToken] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Command name, if one has been attached
    pub fn name(&self) -> Option<&str> {
        match self.0.first() {
            Some(WireToken::Name(name)) => Some(name),
            _ => None,
        }
    }

    /// Bytes of every key token, in request order
    pub fn keys(&self) -> impl Iterator<Item = &Bytes> {
        self.0.iter().filter_map(|token| match token {
            WireToken::Key(bytes) => Some(bytes),
            _ => None,
        })
    }

    /// Render the request as a RESP array of bulk strings
    pub fn to_request(&self) -> Value {
        Value::array(self.0.iter().map(|token| Value::bulk(token.as_bytes())))
    }

    /// Lossy textual view of every token, mostly useful in logs and tests
    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl From<WireToken> for WireArgs {
    fn from(token: WireToken) -> Self {
        Self::single(token)
    }
}

impl FromIterator<WireToken> for WireArgs {
    fn from_iter<I: IntoIterator<Item = WireToken>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for WireArgs {
    type Item = WireToken;
    type IntoIter = std::vec::IntoIter<WireToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for WireArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}
