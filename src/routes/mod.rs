// Routes module - routing table parsers and the sources that feed them

pub mod netstat;
pub mod proc_route;
pub mod source;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// First-column spellings that mark the default route in `netstat -rn` output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultMarker {
    /// `0.0.0.0`, as printed by Linux net-tools
    Unspecified,
    /// `default`, as printed by BSD, macOS and Solaris
    Default,
}

impl DefaultMarker {
    pub const ALL: [DefaultMarker; 2] = [DefaultMarker::Unspecified, DefaultMarker::Default];

    pub fn as_str(&self) -> &'static str {
        match self {
            DefaultMarker::Unspecified => "0.0.0.0",
            DefaultMarker::Default => "default",
        }
    }

    /// Match a whole whitespace-delimited field against the known markers
    pub fn from_field(field: &str) -> Option<DefaultMarker> {
        Self::ALL.into_iter().find(|marker| marker.as_str() == field)
    }
}

/// Where the routing table is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteSource {
    Netstat,
    #[serde(rename = "proc")]
    ProcNetRoute,
}

impl fmt::Display for RouteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteSource::Netstat => write!(f, "netstat"),
            RouteSource::ProcNetRoute => write!(f, "proc"),
        }
    }
}

impl FromStr for RouteSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "netstat" => Ok(RouteSource::Netstat),
            "proc" | "procfs" => Ok(RouteSource::ProcNetRoute),
            _ => Err(format!("Unknown route source: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayReport {
    pub hostname: String,
    pub source: RouteSource,
    pub gateways: Vec<Ipv4Addr>,
    pub timestamp: String,
}

impl GatewayReport {
    pub fn new(source: RouteSource, gateways: Vec<Ipv4Addr>) -> Self {
        GatewayReport {
            hostname: get_hostname(),
            source,
            gateways,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

fn get_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string())
}
