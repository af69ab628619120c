use std::{io::Read, path::PathBuf};

use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tweet_oracle::Result;
use tweet_oracle_client::bearer_token_from_env;
use tweet_oracle_core::{verify, TweetRecord};
use tweet_oracle_server::{
    build_adapter,
    transport::{self, ProxyEvent},
    ServerConfig,
};

/// Oracle adapter verifying signatures attested in tweets.
#[derive(Parser, Debug)]
#[clap(name = "tweet-oracle", author, version, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start a server.
    Server {
        /// Bind to host:port.
        #[clap(short, long, default_value = "127.0.0.1:8080")]
        bind: String,

        /// Config file to load.
        #[clap(short, long, env = "TWEET_ORACLE_CONFIG", parse(from_os_str))]
        config: Option<PathBuf>,
    },
    /// Verify a tweet by id.
    Invoke {
        /// Job run identifier.
        #[clap(short, long, default_value = "1")]
        id: String,

        /// Config file to load.
        #[clap(short, long, env = "TWEET_ORACLE_CONFIG", parse(from_os_str))]
        config: Option<PathBuf>,

        /// Tweet identifier.
        tweet_id: String,
    },
    /// Handle a function event.
    Event {
        /// Event body is a JSON string (API gateway or queue).
        #[clap(short, long)]
        proxy: bool,

        /// Config file to load.
        #[clap(short, long, env = "TWEET_ORACLE_CONFIG", parse(from_os_str))]
        config: Option<PathBuf>,

        /// Read the event from file, defaults to stdin.
        #[clap(parse(from_os_str))]
        file: Option<PathBuf>,
    },
    /// Verify tweet text offline.
    Check {
        /// Handle of the tweet author.
        #[clap(long)]
        handle: String,

        /// Tweet text.
        text: String,
    },
}

fn read_event(file: Option<PathBuf>) -> Result<Value> {
    let buffer = match file {
        Some(file) => std::fs::read(file)?,
        None => {
            let mut buffer = Vec::new();
            std::io::stdin().read_to_end(&mut buffer)?;
            buffer
        }
    };
    Ok(serde_json::from_slice(&buffer)?)
}

async fn run() -> Result<()> {
    let args = Cli::parse();

    match args.command {
        Command::Server { bind, config } => {
            let bearer_token = bearer_token_from_env()?;
            tweet_oracle_server::start(bind, config, bearer_token).await?;
        }
        Command::Invoke {
            id,
            config,
            tweet_id,
        } => {
            let config = ServerConfig::load_or_default(config)?;
            let adapter = build_adapter(&config, bearer_token_from_env()?)?;
            let input = serde_json::json!({
                "id": id,
                "data": { "tweetId": tweet_id },
            });
            let response = transport::lambda(&adapter, input).await;
            serde_json::to_writer_pretty(std::io::stdout(), &response)?;
        }
        Command::Event {
            proxy,
            config,
            file,
        } => {
            let event = read_event(file)?;
            let config = ServerConfig::load_or_default(config)?;
            let adapter = build_adapter(&config, bearer_token_from_env()?)?;
            if proxy {
                let event: ProxyEvent = serde_json::from_value(event)?;
                let response = transport::proxy(&adapter, event).await?;
                serde_json::to_writer_pretty(std::io::stdout(), &response)?;
            } else {
                let response = transport::lambda(&adapter, event).await;
                serde_json::to_writer_pretty(std::io::stdout(), &response)?;
            }
        }
        Command::Check { handle, text } => {
            let record = TweetRecord {
                id: String::new(),
                text,
                author_handle: handle,
            };
            let result = verify(&record)?;
            serde_json::to_writer_pretty(std::io::stdout(), &result)?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run().await {
        Ok(_) => {}
        Err(e) => {
            tracing::error!("{}", e);
        }
    }
    Ok(())
}
