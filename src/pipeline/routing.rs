use super::{dotted_mask, Context, Normalizer};
use crate::error::GuardError;
use crate::models::{ParameterSet, RawParameters};
use crate::utils::net;

pub(super) struct StaticRoute;

impl Normalizer for StaticRoute {
    fn normalize(
        &self,
        _ctx: &Context<'_>,
        raw: &RawParameters,
        out: &mut ParameterSet,
    ) -> Result<(), GuardError> {
        let Some(destination) = raw.text("destination") else {
            return Ok(());
        };

        let (network, derived_mask) = net::cidr_to_network_and_mask(&destination);
        let mask = raw.text("mask").map(|m| dotted_mask(&m)).unwrap_or(derived_mask);
        let prefix_length = net::parse_ipv4(&mask)
            .and_then(net::netmask_to_prefix)
            .ok_or_else(|| GuardError::new(format!("mask {} is not a contiguous netmask", mask)))?;

        out.insert("destination", network);
        out.insert("mask", mask);
        out.insert("prefix_length", prefix_length);
        Ok(())
    }
}

pub(super) struct Ospf;

impl Normalizer for Ospf {
    fn normalize(
        &self,
        ctx: &Context<'_>,
        raw: &RawParameters,
        out: &mut ParameterSet,
    ) -> Result<(), GuardError> {
        if let Some(areas) = raw.text("areas") {
            out.insert_serialized("area_network_list", &net::area_network_list(&areas));
        }
        ctx.expand_ports(raw, "interface_name", "interface_list", out)?;
        ctx.expand_ports(raw, "interface_auth_interface", "interface_auth_list", out)?;
        Ok(())
    }
}
