/// Configuration management
///
/// Loads configuration from environment variables into a type-safe
/// struct.
///
/// # Environment Variables
///
/// - `TASKLIGHT_DATA_DIR`: directory for the file store; when unset, an
///   in-memory store is used and nothing survives restarts
/// - `TASKLIGHT_DELAY_MS`: simulated network latency in milliseconds
///   (default: 800)
/// - `TASKLIGHT_TOKEN_SECRET`: secret for session-token signing
///   (required, at least 32 characters)
/// - `TASKLIGHT_SEED`: whether to seed demo data at startup
///   (default: true)
///
/// # Example
///
/// ```no_run
/// use tasklight::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("latency: {:?}", config.delay());
/// # Ok(())
/// # }
/// ```
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::store::{FileStore, MemoryStore, Store, StoreError};

/// Complete library configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Data directory for the file store; `None` selects the in-memory
    /// backend
    pub data_dir: Option<PathBuf>,

    /// Simulated network latency in milliseconds
    pub delay_ms: u64,

    /// Secret for session-token signing
    ///
    /// Must be at least 32 characters. Generate with:
    /// `openssl rand -hex 32`
    pub token_secret: String,

    /// Whether to seed demo data at startup
    pub seed_on_start: bool,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `TASKLIGHT_TOKEN_SECRET` is missing or too
    /// short, or if `TASKLIGHT_DELAY_MS` is not a number.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let data_dir = env::var("TASKLIGHT_DATA_DIR").ok().map(PathBuf::from);

        let delay_ms = env::var("TASKLIGHT_DELAY_MS")
            .unwrap_or_else(|_| "800".to_string())
            .parse::<u64>()?;

        let token_secret = env::var("TASKLIGHT_TOKEN_SECRET")
            .map_err(|_| anyhow::anyhow!("TASKLIGHT_TOKEN_SECRET environment variable is required"))?;

        if token_secret.len() < 32 {
            anyhow::bail!("TASKLIGHT_TOKEN_SECRET must be at least 32 characters long");
        }

        let seed_on_start = env::var("TASKLIGHT_SEED")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);

        Ok(Self {
            data_dir,
            delay_ms,
            token_secret,
            seed_on_start,
        })
    }

    /// Simulated latency as a `Duration`
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Opens the store this configuration selects
    ///
    /// A file store under `data_dir` when set, an in-memory store
    /// otherwise.
    pub fn open_store(&self) -> Result<Arc<dyn Store>, StoreError> {
        match &self.data_dir {
            Some(dir) => Ok(Arc::new(FileStore::open(dir.clone())?)),
            None => Ok(Arc::new(MemoryStore::new())),
        }
    }
}
