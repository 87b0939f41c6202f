//! Parameter pipeline: turns validated raw parameters into the parameter
//! set a template renders against.
//!
//! Every config type has one normalization unit. A unit starts from a copy
//! of the raw parameters and adds derived keys (expanded port lists, VLAN
//! batch strings, split CIDRs, ...). Vendor spelling differences go through
//! the vendor's [`VendorDialect`].

mod dhcp;
mod dialect;
mod interfaces;
mod redundancy;
mod routing;
mod stp;
mod vlan;

pub use dialect::{for_vendor, VendorDialect};

use crate::error::GuardError;
use crate::models::{ConfigType, ParameterSet, RawParameters, Vendor};
use crate::utils::net;
use crate::utils::ports::PortExpander;
use crate::utils::vlans::VlanList;

/// Shared inputs of one normalization run
pub(crate) struct Context<'a> {
    pub vendor: Vendor,
    pub dialect: &'static dyn VendorDialect,
    pub expander: &'a PortExpander,
}

impl Context<'_> {
    /// Expand the port notation under `source` into `target`
    fn expand_ports(
        &self,
        raw: &RawParameters,
        source: &str,
        target: &str,
        out: &mut ParameterSet,
    ) -> Result<(), GuardError> {
        if let Some(notation) = raw.text(source) {
            let ports = self
                .expander
                .try_expand(&notation)
                .map_err(|e| GuardError::new(format!("{}: {}", source, e)))?;
            out.insert(target, ports);
        }
        Ok(())
    }
}

pub(crate) trait Normalizer: Sync {
    fn normalize(
        &self,
        ctx: &Context<'_>,
        raw: &RawParameters,
        out: &mut ParameterSet,
    ) -> Result<(), GuardError>;
}

fn unit(config_type: ConfigType) -> &'static dyn Normalizer {
    match config_type {
        ConfigType::VlanManagement => &vlan::VlanManagement,
        ConfigType::InterfaceConfig => &interfaces::InterfaceConfig,
        ConfigType::PortAggregation => &interfaces::PortAggregation,
        ConfigType::DhcpService => &dhcp::DhcpService,
        ConfigType::StaticRoute => &routing::StaticRoute,
        ConfigType::InterfaceIp => &interfaces::InterfaceIp,
        ConfigType::StpConfig => &stp::Stp,
        ConfigType::OspfConfig => &routing::Ospf,
        ConfigType::VrrpConfig => &redundancy::Vrrp,
        ConfigType::BfdConfig => &redundancy::Bfd,
        ConfigType::VlanCompleteConfig => &vlan::VlanComplete,
    }
}

#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    expander: PortExpander,
}

impl Pipeline {
    pub fn new(expander: PortExpander) -> Self {
        Self { expander }
    }

    pub fn expander(&self) -> &PortExpander {
        &self.expander
    }

    pub fn normalize(
        &self,
        config_type: ConfigType,
        vendor: Vendor,
        raw: &RawParameters,
    ) -> Result<ParameterSet, GuardError> {
        let ctx = Context {
            vendor,
            dialect: for_vendor(vendor),
            expander: &self.expander,
        };
        let mut params = ParameterSet::from_raw(raw);
        unit(config_type).normalize(&ctx, raw, &mut params)?;
        Ok(params)
    }
}

/// Replace a checkbox-style value with a real boolean when present
fn coerce_flag(raw: &RawParameters, key: &str, out: &mut ParameterSet) {
    if raw.has(key) {
        out.insert(key, raw.flag(key));
    }
}

fn parse_vlans(key: &str, notation: &str) -> Result<VlanList, GuardError> {
    VlanList::parse(notation).map_err(|e| GuardError::new(format!("{}: {}", key, e)))
}

/// A mask given as a prefix length (`24` or `/24`) becomes dotted; anything
/// else is returned as written.
fn dotted_mask(mask: &str) -> String {
    mask.trim_start_matches('/')
        .parse::<u8>()
        .ok()
        .and_then(net::prefix_to_netmask)
        .unwrap_or_else(|| mask.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(super) fn raw(pairs: &[(&str, &str)]) -> RawParameters {
        RawParameters::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn test_unknown_keys_pass_through() {
        let pipeline = Pipeline::default();
        let params = pipeline
            .normalize(
                ConfigType::StaticRoute,
                Vendor::Huawei,
                &raw(&[("destination", "10.1.0.0/16"), ("next_hop", "10.0.0.1"), ("note", "x")]),
            )
            .unwrap();
        assert_eq!(params.text("note").as_deref(), Some("x"));
        assert_eq!(params.text("next_hop").as_deref(), Some("10.0.0.1"));
    }

    #[test]
    fn test_dotted_mask() {
        assert_eq!(dotted_mask("24"), "255.255.255.0");
        assert_eq!(dotted_mask("/30"), "255.255.255.252");
        assert_eq!(dotted_mask("255.255.0.0"), "255.255.0.0");
        assert_eq!(dotted_mask("99"), "99");
    }

    #[test]
    fn test_expander_bounds_are_used() {
        use crate::utils::ports::ExpandBounds;

        let pipeline = Pipeline::new(PortExpander::new(ExpandBounds {
            ports_per_slot: 2,
            ..ExpandBounds::default()
        }));
        let params = pipeline
            .normalize(
                ConfigType::InterfaceIp,
                Vendor::H3c,
                &raw(&[("interface", "GigabitEthernet1/1-2/1"), ("ip_address", "10.0.0.1/24")]),
            )
            .unwrap();
        assert_eq!(
            params.get("port_list").unwrap(),
            &serde_json::json!(["GigabitEthernet1/1", "GigabitEthernet1/2", "GigabitEthernet2/1"])
        );
    }
}
