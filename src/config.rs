//! Runtime configuration from command-line flags and environment variables.

use std::net::SocketAddr;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::logging::LogFormat;
use crate::portal::DEFAULT_PORTAL_URL;

#[derive(Clone, Debug, Parser)]
#[command(
    name = "vitibrasil",
    version,
    about = "JSON API over the Embrapa Vitibrasil viticulture statistics portal"
)]
pub struct Config {
    /// Address to listen on.
    #[arg(long, env = "VITIBRASIL_ADDR", default_value = "127.0.0.1:5000")]
    pub addr: SocketAddr,

    /// Portal page that receives the `opcao`/`ano`/`subopcao` query.
    #[arg(long, env = "VITIBRASIL_PORTAL_URL", default_value = DEFAULT_PORTAL_URL)]
    pub portal_url: String,

    /// Seconds to wait for the portal before giving up.
    #[arg(long = "portal-timeout", env = "VITIBRASIL_PORTAL_TIMEOUT", default_value_t = 30)]
    pub portal_timeout_secs: u64,

    /// Public base URL of this API, used in the help endpoint's example.
    #[arg(long, env = "VITIBRASIL_PUBLIC_URL", default_value = "http://127.0.0.1:5000")]
    pub public_url: String,

    #[arg(long, env = "VITIBRASIL_PROFILE", value_enum, default_value = "dev")]
    pub profile: Profile,

    /// Log output format (pretty for humans, json for log collectors).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormat,
}

impl Config {
    pub fn portal_timeout(&self) -> Duration {
        Duration::from_secs(self.portal_timeout_secs)
    }
}

/// Deployment profile.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum Profile {
    /// Indented JSON, debug logging.
    #[default]
    Dev,
    /// Compact JSON, info logging.
    Prod,
}

impl Profile {
    pub fn pretty_json(self) -> bool {
        matches!(self, Self::Dev)
    }

    /// Filter used when `RUST_LOG` is not set.
    pub fn default_log_directive(self) -> &'static str {
        match self {
            Self::Dev => "vitibrasil=debug,info",
            Self::Prod => "info",
        }
    }
}
