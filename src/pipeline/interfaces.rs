use super::{dotted_mask, parse_vlans, Context, Normalizer};
use crate::error::GuardError;
use crate::models::{ParameterSet, RawParameters};
use crate::utils::net;

pub(super) struct InterfaceConfig;

impl Normalizer for InterfaceConfig {
    fn normalize(
        &self,
        ctx: &Context<'_>,
        raw: &RawParameters,
        out: &mut ParameterSet,
    ) -> Result<(), GuardError> {
        derive_port_settings(ctx, raw, out)
    }
}

/// Ports from `interface`, plus the allowed VLANs of a trunk
pub(super) fn derive_port_settings(
    ctx: &Context<'_>,
    raw: &RawParameters,
    out: &mut ParameterSet,
) -> Result<(), GuardError> {
    ctx.expand_ports(raw, "interface", "port_list", out)?;

    let is_trunk = raw
        .text("port_mode")
        .is_some_and(|mode| mode.eq_ignore_ascii_case("trunk"));
    if is_trunk {
        if let Some(allowed) = raw.text("allowed_vlans") {
            let vlans = parse_vlans("allowed_vlans", &allowed)?;
            out.insert("trunk_vlans", ctx.dialect.format_vlan_batch(&vlans));
            out.insert("allowed_vlan_list", vlans.ids().to_vec());
        }
    }
    Ok(())
}

pub(super) struct PortAggregation;

impl Normalizer for PortAggregation {
    fn normalize(
        &self,
        ctx: &Context<'_>,
        raw: &RawParameters,
        out: &mut ParameterSet,
    ) -> Result<(), GuardError> {
        ctx.expand_ports(raw, "interfaces", "member_port_list", out)?;

        let lag_id = raw.text("lag_id").unwrap_or_else(|| "1".to_string());
        out.insert("lag_interface", ctx.dialect.aggregation_interface(&lag_id));
        out.insert("lag_id", lag_id);
        Ok(())
    }
}

pub(super) struct InterfaceIp;

impl Normalizer for InterfaceIp {
    fn normalize(
        &self,
        ctx: &Context<'_>,
        raw: &RawParameters,
        out: &mut ParameterSet,
    ) -> Result<(), GuardError> {
        ctx.expand_ports(raw, "interface", "port_list", out)?;

        if let Some(address) = raw.text("ip_address") {
            let (host, derived_mask) = net::cidr_to_host_and_mask(&address);
            let mask = raw
                .text("subnet_mask")
                .map(|m| dotted_mask(&m))
                .unwrap_or(derived_mask);
            out.insert("ip_address", host);
            out.insert("subnet_mask", mask);
        }
        Ok(())
    }
}
