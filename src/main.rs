use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::Duration;

use clap::{Parser, Subcommand};
use coredb_client::config::{CodecKind, Config};
use coredb_client::executor::TcpExecutor;
use coredb_client::options::{Changed, Existence, Expire, MemberScore, Update};
use coredb_client::{BinaryCodec, Client, JsonCodec, TextCodec};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "coredb-cli", version, about = "Typed command-line client for CoreDB")]
struct Args {
  /// Path to a TOML config file
  #[arg(long)]
  config: Option<String>,
  /// Server address, overrides the config file
  #[arg(long)]
  addr: Option<String>,
  /// Codec for keys and values, overrides the config file
  #[arg(long, value_enum)]
  codec: Option<CodecKind>,
  #[command(subcommand)]
  command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
  Get {
    key: String,
  },
  Set {
    key: String,
    value: String,
    /// Expire after this many seconds
    #[arg(long, conflicts_with = "px")]
    ex: Option<u64>,
    /// Expire after this many milliseconds
    #[arg(long)]
    px: Option<u64>,
    #[arg(long, conflicts_with = "xx")]
    nx: bool,
    #[arg(long)]
    xx: bool,
  },
  Del {
    key: String,
    keys: Vec<String>,
  },
  Expire {
    key: String,
    seconds: u64,
  },
  Ttl {
    key: String,
  },
  Sadd {
    key: String,
    member: String,
    members: Vec<String>,
  },
  Smembers {
    key: String,
  },
  Zadd {
    key: String,
    score: f64,
    member: String,
    #[arg(long, conflicts_with = "nx")]
    xx: bool,
    #[arg(long)]
    nx: bool,
    #[arg(long)]
    ch: bool,
  },
  Zscore {
    key: String,
    member: String,
  },
  Zrange {
    key: String,
    #[arg(allow_negative_numbers = true)]
    start: i64,
    #[arg(allow_negative_numbers = true)]
    stop: i64,
    #[arg(long)]
    withscores: bool,
  },
}

fn init_logging(config: &Config) -> anyhow::Result<()> {
  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(true)
    .with_thread_ids(true);

  match &config.log.file {
    Some(path) => {
      let file = OpenOptions::new().create(true).append(true).open(path)?;
      builder.with_ansi(false).with_writer(Mutex::new(file)).init();
    }
    None => builder.with_writer(std::io::stderr).init(),
  }
  Ok(())
}

async fn run<C: BinaryCodec>(client: Client<TcpExecutor, C>, command: Cmd) -> anyhow::Result<()> {
  debug!("Running {:?}", command);
  match command {
    Cmd::Get { key } => match client.get(&key).returning::<String>().await? {
      Some(value) => println!("{}", value),
      None => println!("(nil)"),
    },
    Cmd::Set {
      key,
      value,
      ex,
      px,
      nx,
      xx,
    } => {
      let expire = match (ex, px) {
        (Some(secs), _) => Some(Expire::Seconds(Duration::from_secs(secs))),
        (None, Some(millis)) => Some(Expire::Milliseconds(Duration::from_millis(millis))),
        (None, None) => None,
      };
      let existence = match (nx, xx) {
        (true, _) => Some(Existence::NotExists),
        (false, true) => Some(Existence::Exists),
        (false, false) => None,
      };
      let written = client.set(&key, &value, expire, existence).await?;
      println!("{}", if written { "OK" } else { "(nil)" });
    }
    Cmd::Del { key, keys } => println!("{}", client.del(&key, &keys).await?),
    Cmd::Expire { key, seconds } => {
      let set = client.expire(&key, Duration::from_secs(seconds)).await?;
      println!("{}", set as i64);
    }
    Cmd::Ttl { key } => match client.ttl(&key).await? {
      Some(ttl) => println!("{}", ttl.as_secs()),
      None => println!("(none)"),
    },
    Cmd::Sadd {
      key,
      member,
      members,
    } => println!("{}", client.sadd(&key, &member, &members).await?),
    Cmd::Smembers { key } => {
      for member in client.smembers(&key).returning::<String>().await? {
        println!("{}", member);
      }
    }
    Cmd::Zadd {
      key,
      score,
      member,
      xx,
      nx,
      ch,
    } => {
      let update = match (xx, nx) {
        (true, _) => Some(Update::SetExisting),
        (false, true) => Some(Update::SetNew),
        (false, false) => None,
      };
      let changed = ch.then_some(Changed);
      let member = MemberScore::new(score, member);
      println!("{}", client.zadd(&key, update, changed, &member, &[]).await?);
    }
    Cmd::Zscore { key, member } => match client.zscore(&key, &member).await? {
      Some(score) => println!("{}", score),
      None => println!("(nil)"),
    },
    Cmd::Zrange {
      key,
      start,
      stop,
      withscores,
    } => {
      if withscores {
        let scored = client
          .zrange_with_scores(&key, start..=stop)
          .returning::<String>()
          .await?;
        for entry in scored {
          println!("{} {}", entry.member, entry.score);
        }
      } else {
        for member in client.zrange(&key, start..=stop).returning::<String>().await? {
          println!("{}", member);
        }
      }
    }
  }
  Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let args = Args::parse();

  let mut config = match &args.config {
    Some(path) => Config::from_file(path)?,
    None => Config::default(),
  };
  if let Some(addr) = args.addr {
    config.server_addr = addr;
  }
  if let Some(codec) = args.codec {
    config.codec = codec;
  }

  init_logging(&config)?;
  info!("Connecting to {} with {:?} codec", config.server_addr, config.codec);

  let executor = TcpExecutor::connect(&config.server_addr).await?;
  match config.codec {
    CodecKind::Text => run(Client::new(executor, TextCodec), args.command).await,
    CodecKind::Json => run(Client::new(executor, JsonCodec), args.command).await,
  }
}
