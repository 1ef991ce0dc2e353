// Rendering of lookup results for the command line

use crate::config::OutputFormat;
use crate::error::GatewayResult;
use crate::routes::GatewayReport;
use crate::routes::source::Lookup;

/// Render a lookup as text (one address per line) or as a JSON report.
/// Unless `all` is set only the first gateway is included.
pub fn render(lookup: &Lookup, format: OutputFormat, all: bool) -> GatewayResult<String> {
    let gateways = if all {
        lookup.gateways.clone()
    } else {
        lookup.gateways.iter().take(1).copied().collect()
    };

    match format {
        OutputFormat::Text => Ok(gateways
            .iter()
            .map(|gw| gw.to_string())
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => {
            let report = GatewayReport::new(lookup.source, gateways);
            Ok(serde_json::to_string_pretty(&report)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::RouteSource;
    use std::net::Ipv4Addr;

    fn lookup() -> Lookup {
        Lookup {
            source: RouteSource::ProcNetRoute,
            gateways: vec![Ipv4Addr::new(10, 0, 0, 1), Ipv4Addr::new(10, 0, 0, 2)],
        }
    }

    #[test]
    fn test_text_first_only() {
        assert_eq!(render(&lookup(), OutputFormat::Text, false).unwrap(), "10.0.0.1");
    }

    #[test]
    fn test_text_all() {
        assert_eq!(
            render(&lookup(), OutputFormat::Text, true).unwrap(),
            "10.0.0.1\n10.0.0.2"
        );
    }

    #[test]
    fn test_json_report() {
        let out = render(&lookup(), OutputFormat::Json, true).unwrap();
        let report: GatewayReport = serde_json::from_str(&out).unwrap();
        assert_eq!(report.source, RouteSource::ProcNetRoute);
        assert_eq!(report.gateways, lookup().gateways);
    }
}
