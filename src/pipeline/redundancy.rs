use super::{coerce_flag, Context, Normalizer};
use crate::error::GuardError;
use crate::models::{ParameterSet, RawParameters};
use crate::utils::net;

/// Priority owned by the router that holds the virtual address itself
const VRRP_OWNER_PRIORITY: &str = "255";

pub(super) struct Vrrp;

impl Normalizer for Vrrp {
    fn normalize(
        &self,
        ctx: &Context<'_>,
        raw: &RawParameters,
        out: &mut ParameterSet,
    ) -> Result<(), GuardError> {
        if raw.text("priority").as_deref() == Some(VRRP_OWNER_PRIORITY) {
            return Err(GuardError::new(
                "VRRP priority 255 is reserved for the address owner",
            ));
        }

        ctx.expand_ports(raw, "interface", "port_list", out)?;
        coerce_flag(raw, "preempt", out);

        if let Some(virtual_ip) = raw.text("virtual_ip") {
            if virtual_ip.contains('/') {
                let (host, mask) = net::cidr_to_host_and_mask(&virtual_ip);
                out.insert("virtual_ip", host);
                out.insert("virtual_mask", mask);
            }
        }
        Ok(())
    }
}

pub(super) struct Bfd;

impl Normalizer for Bfd {
    fn normalize(
        &self,
        ctx: &Context<'_>,
        raw: &RawParameters,
        out: &mut ParameterSet,
    ) -> Result<(), GuardError> {
        if let (Some(local), Some(remote)) = (
            raw.text("local_discriminator"),
            raw.text("remote_discriminator"),
        ) {
            if local == remote {
                return Err(GuardError::new(format!(
                    "local and remote BFD discriminators must differ, both are {}",
                    local
                )));
            }
        }

        if let Some(peer) = raw.text("peer_ip") {
            let host = peer.split_once('/').map(|(ip, _)| ip.trim()).unwrap_or(peer.as_str());
            out.insert("peer_ip", host.to_string());
        }
        ctx.expand_ports(raw, "interface", "port_list", out)?;
        Ok(())
    }
}
