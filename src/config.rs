// Configuration management for defgw
// Supports CLI arguments, config file (TOML), and environment variables

use crate::routes::RouteSource;
use crate::routes::source::{NetstatCommand, PATH_PROC_NET_ROUTE, SourceSettings};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::Level;

/// defgw - print the default gateway from the system routing table
#[derive(Parser, Debug, Clone)]
#[command(name = "defgw")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Routing table source (auto, netstat, proc)
    #[arg(short, long, env = "DEFGW_SOURCE")]
    pub source: Option<String>,

    /// Output format (text, json)
    #[arg(short, long, env = "DEFGW_FORMAT")]
    pub format: Option<String>,

    /// Print every default gateway, not just the first
    #[arg(short, long)]
    pub all: bool,

    /// Path to the kernel route table
    #[arg(long, env = "DEFGW_PROC_PATH")]
    pub proc_path: Option<PathBuf>,

    /// Command used to dump the routing table
    #[arg(long, env = "DEFGW_NETSTAT_CMD")]
    pub netstat_cmd: Option<String>,

    /// Don't fall back to netstat when /proc/net/route fails
    #[arg(long, env = "DEFGW_NO_FALLBACK")]
    pub no_fallback: bool,

    /// Logging level (error, warn, info, debug, trace)
    #[arg(short, long, env = "DEFGW_LOG")]
    pub log_level: Option<String>,

    /// Path to configuration file
    #[arg(short, long, env = "DEFGW_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Configuration file structure (TOML format)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Routing table source settings
    #[serde(default)]
    pub source: SourceConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// auto, netstat or proc
    #[serde(default = "default_source_kind")]
    pub kind: String,

    #[serde(default = "default_proc_path")]
    pub proc_path: PathBuf,

    #[serde(default = "default_netstat_command")]
    pub netstat_command: String,

    /// Fall back to netstat when the kernel table can't be used
    #[serde(default = "default_true")]
    pub fallback: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// text or json
    #[serde(default = "default_format")]
    pub format: String,

    #[serde(default)]
    pub all: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_source_kind() -> String {
    "auto".to_string()
}
fn default_proc_path() -> PathBuf {
    PathBuf::from(PATH_PROC_NET_ROUTE)
}
fn default_netstat_command() -> String {
    "netstat -rn".to_string()
}
fn default_true() -> bool {
    true
}
fn default_format() -> String {
    "text".to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            kind: default_source_kind(),
            proc_path: default_proc_path(),
            netstat_command: default_netstat_command(),
            fallback: default_true(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            format: default_format(),
            all: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Merged configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub source: SourceSettings,
    pub format: OutputFormat,
    pub all: bool,
    pub log_level: Level,
    /// Config file that was read, if any
    pub config_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from all sources (CLI args, config file, defaults)
    /// Priority: CLI args > Environment variables > Config file > Defaults
    pub fn load() -> anyhow::Result<Self> {
        Self::from_args(CliArgs::parse())
    }

    pub fn from_args(cli_args: CliArgs) -> anyhow::Result<Self> {
        let config_path = cli_args.config.clone().or_else(|| {
            let default_path = PathBuf::from("defgw.toml");
            default_path.exists().then_some(default_path)
        });
        let config_file = match &config_path {
            Some(path) => read_config_file(path)?,
            None => ConfigFile::default(),
        };

        let kind = cli_args.source.unwrap_or(config_file.source.kind);
        let source = parse_source(&kind)?;
        let proc_path = cli_args.proc_path.unwrap_or(config_file.source.proc_path);
        let netstat_line = cli_args
            .netstat_cmd
            .unwrap_or(config_file.source.netstat_command);
        let netstat = NetstatCommand::from_command_line(&netstat_line)?;
        let fallback = !cli_args.no_fallback && config_file.source.fallback;

        let format = parse_format(&cli_args.format.unwrap_or(config_file.output.format))?;
        let all = cli_args.all || config_file.output.all;
        let log_level = parse_log_level(&cli_args.log_level.unwrap_or(config_file.logging.level))?;

        Ok(Config {
            source: SourceSettings {
                source,
                proc_path,
                netstat,
                fallback,
            },
            format,
            all,
            log_level,
            config_path,
        })
    }
}

fn read_config_file(path: &Path) -> anyhow::Result<ConfigFile> {
    let config_content = std::fs::read_to_string(path)?;
    Ok(toml::from_str::<ConfigFile>(&config_content)?)
}

/// `auto` leaves the choice to the platform
fn parse_source(kind: &str) -> anyhow::Result<Option<RouteSource>> {
    if kind.eq_ignore_ascii_case("auto") {
        return Ok(None);
    }
    kind.parse::<RouteSource>()
        .map(Some)
        .map_err(|e| anyhow::anyhow!(e))
}

fn parse_format(format: &str) -> anyhow::Result<OutputFormat> {
    match format.to_lowercase().as_str() {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        _ => Err(anyhow::anyhow!("Invalid output format: {}", format)),
    }
}

fn parse_log_level(level_str: &str) -> anyhow::Result<Level> {
    match level_str.to_lowercase().as_str() {
        "error" => Ok(Level::ERROR),
        "warn" => Ok(Level::WARN),
        "info" => Ok(Level::INFO),
        "debug" => Ok(Level::DEBUG),
        "trace" => Ok(Level::TRACE),
        _ => Err(anyhow::anyhow!("Invalid log level: {}", level_str)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(extra: &[&str]) -> CliArgs {
        let mut argv = vec!["defgw"];
        argv.extend_from_slice(extra);
        CliArgs::parse_from(argv)
    }

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();
        assert_eq!(config.source.kind, "auto");
        assert_eq!(config.source.proc_path, PathBuf::from("/proc/net/route"));
        assert_eq!(config.source.netstat_command, "netstat -rn");
        assert!(config.source.fallback);
        assert_eq!(config.output.format, "text");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_parse_log_level() {
        assert!(matches!(parse_log_level("info"), Ok(Level::INFO)));
        assert!(matches!(parse_log_level("DEBUG"), Ok(Level::DEBUG)));
        assert!(parse_log_level("invalid").is_err());
    }

    #[test]
    fn test_parse_source() {
        assert_eq!(parse_source("auto").unwrap(), None);
        assert_eq!(parse_source("netstat").unwrap(), Some(RouteSource::Netstat));
        assert_eq!(parse_source("proc").unwrap(), Some(RouteSource::ProcNetRoute));
        assert!(parse_source("ip").is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ConfigFile = toml::from_str("[output]\nformat = \"json\"\n").unwrap();
        assert_eq!(config.output.format, "json");
        assert!(!config.output.all);
        assert_eq!(config.source.kind, "auto");
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[source]\nkind = \"proc\"\nproc_path = \"/tmp/route\"\nnetstat_command = \"netstat -rn -f inet\"\nfallback = true\n\n[output]\nformat = \"json\"\nall = true\n"
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = Config::from_args(args(&["--config", &path, "--source", "netstat", "--no-fallback"])).unwrap();
        assert_eq!(config.source.source, Some(RouteSource::Netstat));
        assert_eq!(config.source.proc_path, PathBuf::from("/tmp/route"));
        assert_eq!(config.source.netstat.args, vec!["-rn", "-f", "inet"]);
        assert!(!config.source.fallback);
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.all);
        assert_eq!(config.log_level, Level::WARN);
        assert_eq!(config.config_path, Some(file.path().to_path_buf()));
    }

    #[test]
    fn test_invalid_format_is_rejected() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap().to_string();
        assert!(Config::from_args(args(&["--config", &path, "--format", "yaml"])).is_err());
    }
}
