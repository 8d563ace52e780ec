use crate::error::{Error, Result};

/// RESP (REdis Serialization Protocol) data types
///
/// This is the raw reply handed back by an executor before any decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
  /// Simple strings, used for simple responses like "OK"
  SimpleString(String),
  /// Errors
  Error(String),
  /// Integers
  Integer(i64),
  /// Bulk strings, used for binary-safe strings (can be null)
  BulkString(Option<Vec<u8>>),
  /// Arrays of other values (can be null)
  Array(Option<Vec<Value>>),
}

impl Value {
  /// Create a simple OK response
  pub fn ok() -> Self {
    Value::SimpleString("OK".to_string())
  }

  /// Create an error response
  pub fn error(msg: impl Into<String>) -> Self {
    Value::Error(msg.into())
  }

  /// Create a non-null bulk string
  pub fn bulk(data: impl Into<Vec<u8>>) -> Self {
    Value::BulkString(Some(data.into()))
  }

  /// Create a non-null array
  pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
    Value::Array(Some(items.into_iter().collect()))
  }

  /// Null bulk string or null array
  pub fn is_nil(&self) -> bool {
    matches!(self, Value::BulkString(None) | Value::Array(None))
  }

  /// Short description of the reply shape, used in decode errors
  pub fn kind(&self) -> &'static str {
    match self {
      Value::SimpleString(_) => "simple string",
      Value::Error(_) => "error",
      Value::Integer(_) => "integer",
      Value::BulkString(None) => "nil bulk string",
      Value::BulkString(Some(_)) => "bulk string",
      Value::Array(None) => "nil array",
      Value::Array(Some(_)) => "array",
    }
  }

  /// Encode Value to RESP bytes
  pub fn encode(&self) -> Vec<u8> {
    let mut buf = Vec::new();
    self.encode_to(&mut buf);
    buf
  }

  fn encode_to(&self, buf: &mut Vec<u8>) {
    match self {
      Value::SimpleString(s) => {
        buf.push(b'+');
        buf.extend_from_slice(s.as_bytes());
        buf.extend_from_slice(b"\r\n");
      }
      Value::Error(e) => {
        buf.push(b'-');
        buf.extend_from_slice(e.as_bytes());
        buf.extend_from_slice(b"\r\n");
      }
      Value::Integer(i) => {
        buf.push(b':');
        buf.extend_from_slice(i.to_string().as_bytes());
        buf.extend_from_slice(b"\r\n");
      }
      Value::BulkString(None) => {
        buf.extend_from_slice(b"$-1\r\n");
      }
      Value::BulkString(Some(data)) => {
        buf.push(b'$');
        buf.extend_from_slice(data.len().to_string().as_bytes());
        buf.extend_from_slice(b"\r\n");
        buf.extend_from_slice(data);
        buf.extend_from_slice(b"\r\n");
      }
      Value::Array(None) => {
        buf.extend_from_slice(b"*-1\r\n");
      }
      Value::Array(Some(items)) => {
        buf.push(b'*');
        buf.extend_from_slice(items.len().to_string().as_bytes());
        buf.extend_from_slice(b"\r\n");
        for item in items {
          item.encode_to(buf);
        }
      }
    }
  }
}

/// Parser for RESP replies
pub struct Parser;

impl Parser {
  /// Parse RESP data from buffer
  ///
  /// Returns `Ok(Some((value, consumed_bytes)))` for a complete value,
  /// `Ok(None)` when more bytes are needed, and an error for bytes that can
  /// never form a valid value.
  pub fn parse(buffer: &[u8]) -> Result<Option<(Value, usize)>> {
    if buffer.is_empty() {
      return Ok(None);
    }

    let mut pos = 0;
    Ok(Self::parse_value(buffer, &mut pos)?.map(|value| (value, pos)))
  }

  fn parse_value(buffer: &[u8], pos: &mut usize) -> Result<Option<Value>> {
    if *pos >= buffer.len() {
      return Ok(None);
    }

    let type_byte = buffer[*pos];
    *pos += 1;

    match type_byte {
      b'+' => Ok(Self::read_line(buffer, pos)
        .map(|line| Value::SimpleString(String::from_utf8_lossy(line).to_string()))),
      b'-' => Ok(Self::read_line(buffer, pos)
        .map(|line| Value::Error(String::from_utf8_lossy(line).to_string()))),
      b':' => Self::parse_integer(buffer, pos),
      b'$' => Self::parse_bulk_string(buffer, pos),
      b'*' => Self::parse_array(buffer, pos),
      other => Err(Error::Protocol(format!(
        "invalid frame type byte `{}`",
        other as char
      ))),
    }
  }

  fn parse_integer(buffer: &[u8], pos: &mut usize) -> Result<Option<Value>> {
    match Self::read_line(buffer, pos) {
      Some(line) => Ok(Some(Value::Integer(Self::to_int(line)?))),
      None => Ok(None),
    }
  }

  fn parse_bulk_string(buffer: &[u8], pos: &mut usize) -> Result<Option<Value>> {
    let Some(line) = Self::read_line(buffer, pos) else {
      return Ok(None);
    };
    let len = Self::to_int(line)?;

    if len == -1 {
      return Ok(Some(Value::BulkString(None)));
    }

    if len < 0 {
      return Err(Error::Protocol(format!("invalid bulk length {}", len)));
    }

    let len = len as usize;

    // Check if we have enough data (len + \r\n)
    if len.saturating_add(2) > buffer.len() - *pos {
      return Ok(None);
    }

    if &buffer[*pos + len..*pos + len + 2] != b"\r\n" {
      return Err(Error::Protocol(format!(
        "bulk string of length {} is not terminated by CRLF",
        len
      )));
    }

    let data = buffer[*pos..*pos + len].to_vec();
    *pos += len + 2; // +2 for \r\n

    Ok(Some(Value::BulkString(Some(data))))
  }

  fn parse_array(buffer: &[u8], pos: &mut usize) -> Result<Option<Value>> {
    let Some(line) = Self::read_line(buffer, pos) else {
      return Ok(None);
    };
    let count = Self::to_int(line)?;

    if count == -1 {
      return Ok(Some(Value::Array(None)));
    }

    if count < 0 {
      return Err(Error::Protocol(format!("invalid array length {}", count)));
    }

    let count = count as usize;
    // The declared count is untrusted; every element needs at least one byte.
    let mut items = Vec::with_capacity(count.min(buffer.len() - *pos));

    for _ in 0..count {
      match Self::parse_value(buffer, pos)? {
        Some(item) => items.push(item),
        None => return Ok(None),
      }
    }

    Ok(Some(Value::Array(Some(items))))
  }

  fn to_int(line: &[u8]) -> Result<i64> {
    atoi::atoi::<i64>(line)
      .filter(|_| !line.is_empty() && line.iter().skip(1).all(u8::is_ascii_digit))
      .ok_or_else(|| {
        Error::Protocol(format!(
          "invalid integer `{}`",
          String::from_utf8_lossy(line)
        ))
      })
  }

  fn read_line<'a>(buffer: &'a [u8], pos: &mut usize) -> Option<&'a [u8]> {
    let start = *pos;

    // Find \r\n
    for i in start..buffer.len().saturating_sub(1) {
      if buffer[i] == b'\r' && buffer[i + 1] == b'\n' {
        *pos = i + 2;
        return Some(&buffer[start..i]);
      }
    }

    None
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_simple_string() {
    let data = b"+OK\r\n";
    let (value, consumed) = Parser::parse(data).unwrap().unwrap();
    assert_eq!(value, Value::SimpleString("OK".to_string()));
    assert_eq!(consumed, 5);
  }

  #[test]
  fn test_parse_bulk_string() {
    let data = b"$5\r\nhello\r\n";
    let (value, consumed) = Parser::parse(data).unwrap().unwrap();
    assert_eq!(value, Value::BulkString(Some(b"hello".to_vec())));
    assert_eq!(consumed, 11);
  }

  #[test]
  fn test_parse_nil_bulk_string() {
    let (value, consumed) = Parser::parse(b"$-1\r\n").unwrap().unwrap();
    assert_eq!(value, Value::BulkString(None));
    assert!(value.is_nil());
    assert_eq!(consumed, 5);
  }

  #[test]
  fn test_parse_error_and_integer() {
    let (value, _) = Parser::parse(b"-ERR unknown command\r\n").unwrap().unwrap();
    assert_eq!(value, Value::error("ERR unknown command"));

    let (value, _) = Parser::parse(b":-42\r\n").unwrap().unwrap();
    assert_eq!(value, Value::Integer(-42));
  }

  #[test]
  fn test_parse_array() {
    let data = b"*2\r\n$1\r\na\r\n:7\r\n";
    let (value, consumed) = Parser::parse(data).unwrap().unwrap();

    match value {
      Value::Array(Some(arr)) => {
        assert_eq!(arr.len(), 2);
        assert_eq!(arr[0], Value::bulk("a"));
        assert_eq!(arr[1], Value::Integer(7));
      }
      _ => panic!("Expected array"),
    }
    assert_eq!(consumed, data.len());
  }

  #[test]
  fn test_parse_incomplete() {
    assert!(Parser::parse(b"").unwrap().is_none());
    assert!(Parser::parse(b"$5\r\nhel").unwrap().is_none());
    assert!(Parser::parse(b"*2\r\n$1\r\na\r\n").unwrap().is_none());
    assert!(Parser::parse(b":12").unwrap().is_none());
  }

  #[test]
  fn test_parse_invalid() {
    assert!(matches!(Parser::parse(b"?x\r\n"), Err(Error::Protocol(_))));
    assert!(matches!(Parser::parse(b":1x\r\n"), Err(Error::Protocol(_))));
    assert!(matches!(Parser::parse(b"$-5\r\n"), Err(Error::Protocol(_))));
  }

  #[test]
  fn test_huge_declared_lengths_do_not_allocate() {
    assert!(Parser::parse(b"*1152921504606846976\r\n").unwrap().is_none());
    assert!(Parser::parse(b"*9223372036854775807\r\n:1\r\n").unwrap().is_none());
    assert!(Parser::parse(b"$9223372036854775807\r\nabc").unwrap().is_none());
  }

  #[test]
  fn test_bulk_string_without_crlf_is_invalid() {
    assert!(matches!(
      Parser::parse(b"$3\r\nabcXY"),
      Err(Error::Protocol(_))
    ));
  }

  #[test]
  fn test_encode_request_array() {
    let value = Value::array([Value::bulk("GET"), Value::bulk("k")]);
    assert_eq!(value.encode(), b"*2\r\n$3\r\nGET\r\n$1\r\nk\r\n");
  }

  #[test]
  fn test_encode_bulk_string() {
    let value = Value::BulkString(Some(b"hello".to_vec()));
    assert_eq!(value.encode(), b"$5\r\nhello\r\n");
  }
}
