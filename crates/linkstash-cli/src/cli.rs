use clap::{Parser, Subcommand};
use linkstash_store::{DEFAULT_VALIDITY_MINUTES, MAX_VALIDITY_MINUTES};
use std::path::PathBuf;

pub const STORE_PATH_ENV: &str = "LINKSTASH_STORE";
pub const BASE_URL_ENV: &str = "LINKSTASH_BASE_URL";
pub const LOG_ENDPOINT_ENV: &str = "LINKSTASH_LOG_ENDPOINT";

pub const DEFAULT_STORE_PATH: &str = "linkstash.json";
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

#[derive(Debug, Parser)]
#[command(name = "linkstash", about = "Local-first URL shortener with click analytics")]
pub struct Cli {
    /// Path of the persisted store document.
    #[arg(long, env = STORE_PATH_ENV, default_value = DEFAULT_STORE_PATH)]
    pub store: PathBuf,

    /// Base URL short links are derived from.
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Optional diagnostic log collector endpoint (best-effort).
    #[arg(long, env = LOG_ENDPOINT_ENV)]
    pub log_endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a short URL.
    Shorten {
        /// The URL to shorten; https:// is assumed when no scheme is given.
        url: String,

        /// Custom shortcode (3-20 chars, alphanumeric, hyphen, underscore).
        #[arg(long)]
        code: Option<String>,

        /// Validity window in minutes.
        #[arg(
            long,
            default_value_t = DEFAULT_VALIDITY_MINUTES,
            value_parser = clap::value_parser!(u32).range(1..=MAX_VALIDITY_MINUTES as i64)
        )]
        validity: u32,
    },

    /// Resolve a shortcode, record the click, and run the redirect countdown.
    Resolve {
        code: String,

        /// Skip the countdown and navigate immediately.
        #[arg(long)]
        now: bool,

        /// Referrer URL to attribute the click to.
        #[arg(long)]
        referrer: Option<String>,
    },

    /// Show click statistics for a shortcode.
    Stats { code: String },

    /// List all short URLs, newest first.
    List,

    /// Delete a short URL and its click log.
    Delete { code: String },

    /// Remove every expired short URL.
    Sweep,
}
