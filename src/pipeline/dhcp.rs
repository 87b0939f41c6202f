use serde::Serialize;

use super::{dotted_mask, Context, Normalizer};
use crate::error::GuardError;
use crate::models::{ParameterSet, RawParameters, Vendor};
use crate::utils::net::{self, DEFAULT_NETMASK};

/// One `excluded-ip-address` statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExcludedRange {
    pub start: String,
    pub end: Option<String>,
}

pub(super) struct DhcpService;

impl Normalizer for DhcpService {
    fn normalize(
        &self,
        ctx: &Context<'_>,
        raw: &RawParameters,
        out: &mut ParameterSet,
    ) -> Result<(), GuardError> {
        if let Some(network) = raw.text("network") {
            let (address, derived_mask) = if network.contains('/') {
                net::cidr_to_network_and_mask(&network)
            } else {
                (network.clone(), DEFAULT_NETMASK.to_string())
            };
            let mask = raw.text("mask").map(|m| dotted_mask(&m)).unwrap_or(derived_mask);
            out.insert("network", address);
            out.insert("mask", mask);
        }

        if let Some(excluded) = raw.text("excluded_addresses") {
            out.insert_serialized("excluded_list", &excluded_ranges(&excluded));
        }

        if let Some(lease) = raw.text("lease_time") {
            out.insert("lease_time", lease_argument(ctx, &lease)?);
        }

        if let Some(servers) = raw.text("dns_servers") {
            let dns: Vec<String> = servers
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            out.insert("dns_list", dns);
        }

        if ctx.vendor == Vendor::Huawei {
            huawei_pool_mode(raw, out)?;
        }
        Ok(())
    }
}

/// Huawei serves DHCP either from a named global pool or directly from a
/// VLAN interface; each mode has its own required field.
fn huawei_pool_mode(raw: &RawParameters, out: &mut ParameterSet) -> Result<(), GuardError> {
    let dhcp_type = raw
        .text("dhcp_type")
        .map(|t| t.to_ascii_lowercase())
        .unwrap_or_else(|| "global".to_string());

    match dhcp_type.as_str() {
        "global" if !raw.has("pool_name") => {
            return Err(GuardError::new("global address pool mode requires pool_name"));
        }
        "interface" => {
            if !raw.has("vlanif") {
                return Err(GuardError::new("interface address pool mode requires vlanif"));
            }
            if let Some(cidr) = raw.text("interface_ip") {
                let (host, mask) = net::cidr_to_host_and_mask(&cidr);
                out.insert("interface_ip_addr", host);
                out.insert("interface_subnet_mask", mask);
            }
        }
        _ => {}
    }

    out.insert("dhcp_type", dhcp_type);
    Ok(())
}

/// `192.168.1.1-192.168.1.10, 192.168.1.254`
fn excluded_ranges(notation: &str) -> Vec<ExcludedRange> {
    notation
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| match part.split_once('-') {
            Some((start, end)) => ExcludedRange {
                start: start.trim().to_string(),
                end: Some(end.trim().to_string()),
            },
            None => ExcludedRange {
                start: part.to_string(),
                end: None,
            },
        })
        .collect()
}

/// Lease given as `days hours minutes` or as `infinite`/`unlimited`
fn lease_argument(ctx: &Context<'_>, lease: &str) -> Result<String, GuardError> {
    let lease = lease.trim();
    if lease.eq_ignore_ascii_case("infinite") || lease.eq_ignore_ascii_case("unlimited") {
        return Ok(ctx.dialect.infinite_lease().to_string());
    }

    let invalid = || {
        GuardError::new(format!(
            "lease_time '{}' must be 'days hours minutes' within 0-365, 0-23 and 0-59",
            lease
        ))
    };

    let parts: Vec<&str> = lease.split_whitespace().collect();
    let [days, hours, minutes] = parts.as_slice() else {
        return Err(invalid());
    };
    let days: u16 = days.parse().map_err(|_| invalid())?;
    let hours: u8 = hours.parse().map_err(|_| invalid())?;
    let minutes: u8 = minutes.parse().map_err(|_| invalid())?;
    if days > 365 || hours > 23 || minutes > 59 {
        return Err(invalid());
    }

    Ok(ctx.dialect.format_lease_time(days, hours, minutes))
}
