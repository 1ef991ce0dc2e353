//! Default gateway discovery from routing table output.
//!
//! Two parsers do the work: [`parse_netstat_default_gateway`] reads the
//! captured output of `netstat -rn` (Linux, BSD/macOS and Solaris dialects)
//! and [`parse_proc_net_route`] reads the Linux `/proc/net/route` table.
//! [`routes::source`] runs the command or opens the file for the current
//! platform.

pub mod config;
pub mod error;
pub mod output;
pub mod routes;

pub use error::{GatewayError, GatewayResult};
pub use routes::netstat::parse_netstat_default_gateway;
pub use routes::proc_route::{hex_to_ipv4, parse_proc_net_route};
pub use routes::{DefaultMarker, GatewayReport, RouteSource};
