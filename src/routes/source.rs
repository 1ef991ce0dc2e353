// Platform-specific routing table sources

use super::netstat::parse_netstat_default_gateway;
use super::proc_route::parse_proc_net_route;
use super::RouteSource;
use crate::error::{GatewayError, GatewayResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};
use std::process::Command;

pub const PATH_PROC_NET_ROUTE: &str = "/proc/net/route";

/// Program and arguments used to dump the routing table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetstatCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for NetstatCommand {
    fn default() -> Self {
        NetstatCommand {
            program: "netstat".to_string(),
            args: vec!["-rn".to_string()],
        }
    }
}

impl NetstatCommand {
    /// Split a command line such as `netstat -rn -f inet` on whitespace
    pub fn from_command_line(line: &str) -> GatewayResult<Self> {
        let mut parts = line.split_whitespace().map(String::from);
        let program = parts
            .next()
            .ok_or_else(|| GatewayError::Config("empty netstat command".to_string()))?;
        Ok(NetstatCommand {
            program,
            args: parts.collect(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct SourceSettings {
    /// `None` picks the platform default
    pub source: Option<RouteSource>,
    pub proc_path: PathBuf,
    pub netstat: NetstatCommand,
    /// Retry with netstat once when `/proc/net/route` yields nothing usable
    pub fallback: bool,
}

impl Default for SourceSettings {
    fn default() -> Self {
        SourceSettings {
            source: None,
            proc_path: PathBuf::from(PATH_PROC_NET_ROUTE),
            netstat: NetstatCommand::default(),
            fallback: true,
        }
    }
}

/// Gateways found and the source they came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    pub source: RouteSource,
    pub gateways: Vec<Ipv4Addr>,
}

pub fn default_source() -> RouteSource {
    #[cfg(any(target_os = "linux", target_os = "android"))]
    return RouteSource::ProcNetRoute;

    #[cfg(not(any(target_os = "linux", target_os = "android")))]
    return RouteSource::Netstat;
}

/// Run the routing table command and return its stdout
pub fn capture_netstat(command: &NetstatCommand) -> GatewayResult<Vec<u8>> {
    tracing::debug!("Running {} {}", command.program, command.args.join(" "));

    let output = Command::new(&command.program)
        .args(&command.args)
        .output()
        .map_err(|e| GatewayError::CommandExecution(format!("{}: {}", command.program, e)))?;

    if !output.status.success() {
        return Err(GatewayError::CommandExecution(format!(
            "{} exited with {}",
            command.program, output.status
        )));
    }

    Ok(output.stdout)
}

pub fn open_proc_net_route(path: &Path) -> GatewayResult<File> {
    tracing::debug!("Reading routes from {}", path.display());
    Ok(File::open(path)?)
}

fn lookup_source(source: RouteSource, settings: &SourceSettings) -> GatewayResult<Vec<Ipv4Addr>> {
    let gateways = match source {
        RouteSource::Netstat => {
            let output = capture_netstat(&settings.netstat)?;
            vec![parse_netstat_default_gateway(&output)?]
        }
        RouteSource::ProcNetRoute => parse_proc_net_route(open_proc_net_route(&settings.proc_path)?)?,
    };

    if gateways.is_empty() {
        return Err(GatewayError::NotFound);
    }
    Ok(gateways)
}

/// Resolve the default gateways using the configured or platform source
pub fn resolve(settings: &SourceSettings) -> GatewayResult<Lookup> {
    let source = settings.source.unwrap_or_else(default_source);

    match lookup_source(source, settings) {
        Ok(gateways) => {
            tracing::info!("Found {} default gateway(s) via {}", gateways.len(), source);
            Ok(Lookup { source, gateways })
        }
        Err(e) if source == RouteSource::ProcNetRoute && settings.fallback => {
            tracing::warn!("{} lookup failed: {}. Falling back to netstat", source, e);
            let gateways = lookup_source(RouteSource::Netstat, settings)?;
            tracing::info!("Found {} default gateway(s) via netstat", gateways.len());
            Ok(Lookup {
                source: RouteSource::Netstat,
                gateways,
            })
        }
        Err(e) => Err(e),
    }
}

pub fn default_gateways(settings: &SourceSettings) -> GatewayResult<Vec<Ipv4Addr>> {
    resolve(settings).map(|lookup| lookup.gateways)
}

pub fn default_gateway(settings: &SourceSettings) -> GatewayResult<Ipv4Addr> {
    default_gateways(settings)?
        .into_iter()
        .next()
        .ok_or(GatewayError::NotFound)
}
