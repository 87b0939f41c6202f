use super::{coerce_flag, interfaces, parse_vlans, Context, Normalizer};
use crate::error::GuardError;
use crate::models::{ParameterSet, RawParameters};
use crate::utils::net;
use crate::utils::vlans::is_batch_notation;

pub(super) struct VlanManagement;

impl Normalizer for VlanManagement {
    fn normalize(
        &self,
        ctx: &Context<'_>,
        raw: &RawParameters,
        out: &mut ParameterSet,
    ) -> Result<(), GuardError> {
        derive_vlan_batch(ctx, raw, out)
    }
}

/// VLAN creation, access/trunk port membership and the VLAN interface
/// address in one go
pub(super) struct VlanComplete;

impl Normalizer for VlanComplete {
    fn normalize(
        &self,
        ctx: &Context<'_>,
        raw: &RawParameters,
        out: &mut ParameterSet,
    ) -> Result<(), GuardError> {
        derive_vlan_batch(ctx, raw, out)?;
        interfaces::derive_port_settings(ctx, raw, out)?;

        coerce_flag(raw, "configure_vlan_ip", out);
        if raw.flag("configure_vlan_ip") {
            if let Some(cidr) = raw.text("vlan_ip_address") {
                let (host, mask) = net::cidr_to_host_and_mask(&cidr);
                out.insert("vlan_ip_address", host);
                out.insert("vlan_subnet_mask", mask);
            }
        }
        Ok(())
    }
}

/// `vlan_id` may be one id or a batch (`10,20,30-40`). The batch string is
/// built from the parsed list, so it is always sorted and collapsed.
fn derive_vlan_batch(
    ctx: &Context<'_>,
    raw: &RawParameters,
    out: &mut ParameterSet,
) -> Result<(), GuardError> {
    let Some(vlan_id) = raw.text("vlan_id") else {
        out.insert("is_batch", false);
        return Ok(());
    };

    let vlans = parse_vlans("vlan_id", &vlan_id)?;
    out.insert("is_batch", is_batch_notation(&vlan_id));
    out.insert("vlan_list", vlans.ids().to_vec());
    out.insert("vlan_batch", ctx.dialect.format_vlan_batch(&vlans));
    Ok(())
}
