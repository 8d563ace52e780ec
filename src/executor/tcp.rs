use std::net::SocketAddr;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::error::{Error, Result};
use crate::executor::Executor;
use crate::protocol::resp::{Parser, Value};
use crate::protocol::token::WireArgs;

/// Read buffer size for a single socket read
const READ_BUFFER_SIZE: usize = 8192;

struct Connection {
  stream: TcpStream,
  /// Bytes read but not yet consumed by a complete reply
  pending: Vec<u8>,
  /// Set while a round trip is in flight and left set when it fails
  broken: bool,
}

impl Connection {
  async fn round_trip(&mut self, request: &[u8], peer_addr: SocketAddr) -> Result<Value> {
    self.stream.write_all(request).await?;

    let mut buffer = vec![0u8; READ_BUFFER_SIZE];
    loop {
      if let Some((value, consumed)) = Parser::parse(&self.pending)? {
        self.pending.drain(..consumed);
        return Ok(value);
      }

      match self.stream.read(&mut buffer).await? {
        0 => {
          return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "connection closed by server",
          )));
        }
        n => {
          debug!("Read {} bytes from {}", n, peer_addr);
          self.pending.extend_from_slice(&buffer[..n]);
        }
      }
    }
  }
}

/// Executor over a single TCP connection
///
/// Requests are serialized: one request is written and its reply fully read
/// before the next request may start. After a failed or abandoned round trip
/// the connection can no longer be trusted to line replies up with requests,
/// so every later call fails without touching the socket.
pub struct TcpExecutor {
  conn: Mutex<Connection>,
  peer_addr: SocketAddr,
}

impl TcpExecutor {
  /// Connect to a server at `addr`
  pub async fn connect(addr: &str) -> Result<Self> {
    let stream = TcpStream::connect(addr).await?;
    stream.set_nodelay(true)?;
    let peer_addr = stream.peer_addr()?;
    info!("Connected to {}", peer_addr);

    Ok(Self {
      conn: Mutex::new(Connection {
        stream,
        pending: Vec::new(),
        broken: false,
      }),
      peer_addr,
    })
  }

  /// Get the remote address
  pub fn peer_addr(&self) -> SocketAddr {
    self.peer_addr
  }
}

#[async_trait]
impl Executor for TcpExecutor {
  async fn execute(&self, args: WireArgs) -> Result<Value> {
    let request = args.to_request().encode();
    let mut conn = self.conn.lock().await;

    if conn.broken {
      return Err(Error::Io(std::io::Error::new(
        std::io::ErrorKind::NotConnected,
        "connection is unusable after an earlier failure",
      )));
    }

    conn.broken = true;
    match conn.round_trip(&request, self.peer_addr).await {
      Ok(value) => {
        conn.broken = false;
        Ok(value)
      }
      Err(e) => {
        error!("Request to {} failed, dropping connection state: {}", self.peer_addr, e);
        conn.pending.clear();
        Err(e)
      }
    }
  }
}
