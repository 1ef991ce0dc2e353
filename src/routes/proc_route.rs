// Parser for the Linux `/proc/net/route` table

use crate::error::{GatewayError, GatewayResult};
use std::io::{BufRead, BufReader, Read};
use std::net::Ipv4Addr;

const DESTINATION_FIELD: usize = 1;
const GATEWAY_FIELD: usize = 2;
const MASK_FIELD: usize = 7;

/// Decode an 8 digit hex field from `/proc/net/route` into an address.
///
/// The kernel prints the address as a host-order `u32`, so on the
/// little-endian machines that produce this file the least significant byte
/// is the first octet: `01C03EB2` is `178.62.192.1`. The mapping is fixed
/// here rather than taken from the host, since the input is serialized
/// kernel data.
pub fn hex_to_ipv4(field: &str) -> Result<Ipv4Addr, String> {
    if field.len() != 8 || !field.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(format!("expected 8 hex digits, got {:?}", field));
    }
    let value = u32::from_str_radix(field, 16).map_err(|e| format!("{:?}: {}", field, e))?;
    Ok(Ipv4Addr::from(value.to_le_bytes()))
}

/// Collect every default gateway listed in `/proc/net/route` content, in
/// table order.
///
/// A row is a default route when both its destination and mask are
/// `00000000`. The header line is discarded; an input with no data rows
/// yields an empty list. Any undecodable row fails the whole parse.
pub fn parse_proc_net_route<R: Read>(reader: R) -> GatewayResult<Vec<Ipv4Addr>> {
    let mut gateways = Vec::new();

    for (idx, raw) in BufReader::new(reader).split(b'\n').enumerate() {
        let raw = raw?;
        if idx == 0 {
            continue;
        }
        let line_no = idx + 1;

        let line = std::str::from_utf8(&raw).map_err(|e| GatewayError::MalformedRouteEntry {
            line: line_no,
            reason: format!("invalid UTF-8: {}", e),
        })?;

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        if fields.len() <= MASK_FIELD {
            return Err(GatewayError::MalformedRouteEntry {
                line: line_no,
                reason: format!("expected at least {} fields, got {}", MASK_FIELD + 1, fields.len()),
            });
        }

        let decode = |pos: usize| {
            hex_to_ipv4(fields[pos]).map_err(|reason| GatewayError::MalformedRouteEntry {
                line: line_no,
                reason,
            })
        };

        let destination = decode(DESTINATION_FIELD)?;
        let gateway = decode(GATEWAY_FIELD)?;
        let mask = decode(MASK_FIELD)?;

        if destination.is_unspecified() && mask.is_unspecified() {
            gateways.push(gateway);
        }
    }

    Ok(gateways)
}
