// Parser for `netstat -rn` style routing tables (Linux, BSD/macOS, Solaris)

use super::DefaultMarker;
use crate::error::{GatewayError, GatewayResult};
use std::net::Ipv4Addr;

/// Find the default gateway in captured `netstat -rn` output.
///
/// The first line whose first column is a default-route marker wins; the
/// gateway is taken from its second column. Headers, separators and blank
/// lines never match. Lines after the first match are not inspected.
pub fn parse_netstat_default_gateway(output: &[u8]) -> GatewayResult<Ipv4Addr> {
    let text = String::from_utf8_lossy(output);

    for line in text.lines() {
        let mut fields = line.split_whitespace();
        let is_default = fields
            .next()
            .and_then(DefaultMarker::from_field)
            .is_some();
        if !is_default {
            continue;
        }

        let gateway = fields.next().unwrap_or_default();
        return gateway
            .parse::<Ipv4Addr>()
            .map_err(|_| GatewayError::MalformedAddress(gateway.to_string()));
    }

    Err(GatewayError::NotFound)
}
