//! IPv4 address helpers: CIDR parsing and netmask/wildcard conversion.
//!
//! The `cidr_to_*` conversions are fail-soft: malformed input comes back
//! unchanged with a `/24` netmask instead of an error.

use serde::Serialize;
use std::net::Ipv4Addr;

/// Netmask substituted when an input cannot be understood
pub const DEFAULT_NETMASK: &str = "255.255.255.0";
/// Wildcard mask matching `DEFAULT_NETMASK`
pub const DEFAULT_WILDCARD: &str = "0.0.0.255";
/// Prefix length assumed for an OSPF network given without one
const DEFAULT_PREFIX_LEN: u8 = 24;

/// Cidr is an IPv4 address with its prefix length. The address keeps any
/// host bits it was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cidr {
    pub addr: u32,
    pub prefix_len: u8,
}

impl Cidr {
    /// Parse `a.b.c.d/len` or `a.b.c.d/255.255.255.0`. A bare address is a /32.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        match s.split_once('/') {
            Some((ip, prefix)) => Some(Self {
                addr: parse_ipv4(ip)?,
                prefix_len: parse_prefix(prefix)?,
            }),
            None => Some(Self {
                addr: parse_ipv4(s)?,
                prefix_len: 32,
            }),
        }
    }

    pub fn netmask(&self) -> u32 {
        prefix_to_mask(self.prefix_len)
    }

    pub fn network(&self) -> u32 {
        self.addr & self.netmask()
    }

    pub fn broadcast(&self) -> u32 {
        self.network() | !self.netmask()
    }

    pub fn wildcard(&self) -> u32 {
        !self.netmask()
    }
}

/// Parse a dotted-decimal IPv4 address into its 32-bit value
pub fn parse_ipv4(s: &str) -> Option<u32> {
    s.trim().parse::<Ipv4Addr>().ok().map(u32::from)
}

pub fn format_ipv4(value: u32) -> String {
    Ipv4Addr::from(value).to_string()
}

pub fn is_valid_ipv4(s: &str) -> bool {
    parse_ipv4(s).is_some()
}

/// Accepts `a.b.c.d` or `a.b.c.d/len`
pub fn is_valid_ip_or_cidr(s: &str) -> bool {
    Cidr::parse(s).is_some()
}

/// Parse a prefix written either as a length (`24`) or a contiguous
/// dotted netmask (`255.255.255.0`)
pub fn parse_prefix(s: &str) -> Option<u8> {
    let s = s.trim();
    if s.contains('.') {
        netmask_to_prefix(parse_ipv4(s)?)
    } else {
        let len: u8 = s.parse().ok()?;
        (len <= 32).then_some(len)
    }
}

fn prefix_to_mask(len: u8) -> u32 {
    match len {
        0 => 0,
        l if l >= 32 => u32::MAX,
        l => u32::MAX << (32 - u32::from(l)),
    }
}

/// Dotted netmask for a prefix length, None when the length exceeds 32
pub fn prefix_to_netmask(len: u8) -> Option<String> {
    (len <= 32).then(|| format_ipv4(prefix_to_mask(len)))
}

/// Prefix length of a contiguous netmask
pub fn netmask_to_prefix(mask: u32) -> Option<u8> {
    let ones = mask.leading_ones();
    (mask.count_ones() == ones).then_some(ones as u8)
}

/// Wildcard (host) mask for a dotted netmask
pub fn netmask_to_wildcard(mask: &str) -> Option<String> {
    parse_ipv4(mask).map(|m| format_ipv4(!m))
}

/// Network address and netmask of a CIDR, host bits zeroed.
/// Malformed input returns the original text with a /24 netmask.
pub fn cidr_to_network_and_mask(cidr: &str) -> (String, String) {
    match Cidr::parse(cidr) {
        Some(c) => (format_ipv4(c.network()), format_ipv4(c.netmask())),
        None => (cidr.to_string(), DEFAULT_NETMASK.to_string()),
    }
}

/// Address and netmask of a CIDR, keeping the address as written. Used for
/// a device's own interface address. Input without a prefix, or malformed
/// input, returns the original text with a /24 netmask.
pub fn cidr_to_host_and_mask(cidr: &str) -> (String, String) {
    let trimmed = cidr.trim();
    match trimmed.split_once('/').and_then(|_| Cidr::parse(trimmed)) {
        Some(c) => (format_ipv4(c.addr), format_ipv4(c.netmask())),
        None => (cidr.to_string(), DEFAULT_NETMASK.to_string()),
    }
}

/// AreaNetworkRecord is one `network` statement of an OSPF area
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaNetworkRecord {
    pub area_id: String,
    pub network: String,
    pub wildcard: String,
}

/// Parse `area:cidr[,area:cidr...]` into network records. Entries that
/// cannot be parsed are logged and skipped.
pub fn area_network_list(notation: &str) -> Vec<AreaNetworkRecord> {
    let mut records = Vec::new();

    for entry in notation.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let Some((area, network)) = entry.split_once(':') else {
            tracing::warn!("Skipping OSPF area entry without ':': {}", entry);
            continue;
        };
        let (area, network) = (area.trim(), network.trim());
        if area.is_empty() {
            tracing::warn!("Skipping OSPF area entry without area id: {}", entry);
            continue;
        }

        let parsed = if network.contains('/') {
            Cidr::parse(network)
        } else {
            parse_ipv4(network).map(|addr| Cidr {
                addr,
                prefix_len: DEFAULT_PREFIX_LEN,
            })
        };

        match parsed {
            Some(c) => records.push(AreaNetworkRecord {
                area_id: area.to_string(),
                network: format_ipv4(c.network()),
                wildcard: format_ipv4(c.wildcard()),
            }),
            None => tracing::warn!("Skipping OSPF area entry with bad network: {}", entry),
        }
    }

    records
}

/// NetworkInfo summarises the subnet an address belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkInfo {
    pub network: String,
    pub broadcast: String,
    pub netmask: String,
    pub prefix_length: u8,
    pub host_count: u64,
}

/// Subnet details for an address and a mask given as length or dotted netmask
pub fn network_info(ip: &str, mask: &str) -> Option<NetworkInfo> {
    let cidr = Cidr {
        addr: parse_ipv4(ip)?,
        prefix_len: parse_prefix(mask)?,
    };
    let total = 1u64 << (32 - u32::from(cidr.prefix_len));
    Some(NetworkInfo {
        network: format_ipv4(cidr.network()),
        broadcast: format_ipv4(cidr.broadcast()),
        netmask: format_ipv4(cidr.netmask()),
        prefix_length: cidr.prefix_len,
        host_count: total.saturating_sub(2),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cidr_to_network_and_mask() {
        assert_eq!(
            cidr_to_network_and_mask("192.168.1.10/24"),
            ("192.168.1.0".to_string(), "255.255.255.0".to_string())
        );
        assert_eq!(
            cidr_to_network_and_mask("10.1.2.3/255.255.0.0"),
            ("10.1.0.0".to_string(), "255.255.0.0".to_string())
        );
    }

    #[test]
    fn test_cidr_to_host_and_mask_keeps_address() {
        assert_eq!(
            cidr_to_host_and_mask("192.168.1.10/24"),
            ("192.168.1.10".to_string(), "255.255.255.0".to_string())
        );
        assert_eq!(
            cidr_to_host_and_mask("10.0.0.1/30"),
            ("10.0.0.1".to_string(), "255.255.255.252".to_string())
        );
    }

    #[test]
    fn test_malformed_cidr_falls_back() {
        assert_eq!(
            cidr_to_network_and_mask("not-an-ip/24"),
            ("not-an-ip/24".to_string(), DEFAULT_NETMASK.to_string())
        );
        assert_eq!(
            cidr_to_network_and_mask("10.0.0.0/33"),
            ("10.0.0.0/33".to_string(), DEFAULT_NETMASK.to_string())
        );
        assert_eq!(
            cidr_to_host_and_mask("10.0.0.1"),
            ("10.0.0.1".to_string(), DEFAULT_NETMASK.to_string())
        );
    }

    #[test]
    fn test_area_network_list() {
        let records = area_network_list("0.0.0.0:192.168.1.0/24,1:10.0.0.0/8");
        assert_eq!(
            records,
            vec![
                AreaNetworkRecord {
                    area_id: "0.0.0.0".into(),
                    network: "192.168.1.0".into(),
                    wildcard: "0.0.0.255".into(),
                },
                AreaNetworkRecord {
                    area_id: "1".into(),
                    network: "10.0.0.0".into(),
                    wildcard: "0.255.255.255".into(),
                },
            ]
        );
    }

    #[test]
    fn test_area_network_list_skips_bad_entries() {
        let records = area_network_list("0:192.168.1.5, bogus, 1:999.0.0.0/8, 2:172.16.0.0/12");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].network, "192.168.1.0");
        assert_eq!(records[0].wildcard, "0.0.0.255");
        assert_eq!(records[1].area_id, "2");
        assert_eq!(records[1].wildcard, "0.15.255.255");
    }

    #[test]
    fn test_prefix_conversions() {
        assert_eq!(prefix_to_netmask(0).as_deref(), Some("0.0.0.0"));
        assert_eq!(prefix_to_netmask(20).as_deref(), Some("255.255.240.0"));
        assert_eq!(prefix_to_netmask(32).as_deref(), Some("255.255.255.255"));
        assert_eq!(prefix_to_netmask(33), None);
        assert_eq!(netmask_to_prefix(0xFFFF_FF00), Some(24));
        assert_eq!(netmask_to_prefix(0xFF00_FF00), None);
        assert_eq!(parse_prefix("255.255.255.128"), Some(25));
        assert_eq!(netmask_to_wildcard("255.255.255.0").as_deref(), Some("0.0.0.255"));
    }

    #[test]
    fn test_network_info() {
        let info = network_info("192.168.10.77", "26").unwrap();
        assert_eq!(info.network, "192.168.10.64");
        assert_eq!(info.broadcast, "192.168.10.127");
        assert_eq!(info.netmask, "255.255.255.192");
        assert_eq!(info.host_count, 62);
        assert!(network_info("192.168.10.77", "255.0.255.0").is_none());
    }

    #[test]
    fn test_is_valid_ipv4() {
        assert!(is_valid_ipv4("192.168.1.1"));
        assert!(is_valid_ipv4("0.0.0.0"));
        assert!(!is_valid_ipv4("256.1.1.1"));
        assert!(!is_valid_ipv4("1.2.3"));
        assert!(!is_valid_ipv4("; rm -rf /"));
        assert!(is_valid_ip_or_cidr("10.0.0.0/8"));
        assert!(!is_valid_ip_or_cidr("10.0.0.0/40"));
    }
}
