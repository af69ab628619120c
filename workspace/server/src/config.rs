use serde::Deserialize;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};
use url::Url;

use secrecy::SecretString;
use tweet_oracle_client::{RetryPolicy, TweetClient, DEFAULT_SERVER};

use crate::{Error, Result};

fn default_body_limit() -> usize {
    1024 * 64
}

#[derive(Deserialize)]
pub struct ServerConfig {
    /// Configuration for the tweet lookup API.
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Maximum size of body requests.
    #[serde(default = "default_body_limit")]
    pub body_limit: usize,

    /// Configuration for TLS encryption.
    pub tls: Option<TlsConfig>,

    /// Configuration for CORS.
    pub cors: Option<CorsConfig>,

    /// Path the file was loaded from used to determine
    /// relative paths.
    #[serde(skip)]
    file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            upstream: Default::default(),
            body_limit: default_body_limit(),
            tls: None,
            cors: None,
            file: None,
        }
    }
}

impl ServerConfig {
    /// Create a new server config.
    pub fn new(upstream: UpstreamConfig) -> Self {
        Self {
            upstream,
            ..Default::default()
        }
    }

    /// Load a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        if !path.as_ref().is_file() {
            return Err(Error::NotFile(path.as_ref().to_path_buf()));
        }

        let contents = std::fs::read_to_string(path.as_ref())?;
        let mut config: ServerConfig = toml::from_str(&contents)?;
        config.file = Some(path.as_ref().canonicalize()?);

        let dir = config.directory();

        if let Some(tls) = config.tls.as_mut() {
            if tls.cert.is_relative() {
                tls.cert = dir.join(&tls.cert);
            }
            if tls.key.is_relative() {
                tls.key = dir.join(&tls.key);
            }

            tls.cert = tls.cert.canonicalize()?;
            tls.key = tls.key.canonicalize()?;
        }

        Ok(config)
    }

    /// Parent directory of the configuration file.
    fn directory(&self) -> PathBuf {
        self.file
            .as_ref()
            .and_then(|p| p.parent())
            .map(|p| p.to_path_buf())
            .unwrap_or_default()
    }

    /// Load a configuration file or use the defaults.
    pub fn load_or_default(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Default::default()),
        }
    }
}

fn default_upstream_url() -> Url {
    Url::parse(DEFAULT_SERVER).unwrap()
}

fn default_attempts() -> u32 {
    RetryPolicy::default().attempts
}

fn default_delay() -> u64 {
    RetryPolicy::default().delay.as_millis() as u64
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL for the lookup API.
    #[serde(default = "default_upstream_url")]
    pub url: Url,
    /// Maximum number of attempts for retryable failures.
    #[serde(default = "default_attempts")]
    pub attempts: u32,
    /// Delay in milliseconds between attempts.
    #[serde(default = "default_delay")]
    pub delay: u64,
    /// Timeout in seconds for each request.
    pub timeout: Option<u64>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: default_upstream_url(),
            attempts: default_attempts(),
            delay: default_delay(),
            timeout: None,
        }
    }
}

impl UpstreamConfig {
    /// Retry settings for the client.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            attempts: self.attempts,
            delay: Duration::from_millis(self.delay),
        }
    }

    /// Create a client for the lookup API.
    pub fn client(&self, bearer_token: SecretString) -> Result<TweetClient> {
        Ok(TweetClient::new(
            self.url.clone(),
            bearer_token,
            self.retry_policy(),
            self.timeout.map(Duration::from_secs),
        )?)
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct TlsConfig {
    /// Path to the certificate.
    pub cert: PathBuf,
    /// Path to the certificate key file.
    pub key: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
pub struct CorsConfig {
    /// List of additional CORS origins for the server.
    pub origins: Vec<Url>,
}
