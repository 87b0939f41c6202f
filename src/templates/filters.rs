use std::collections::HashMap;
use tera::{Tera, Value};

use crate::utils::net::{self, DEFAULT_NETMASK, DEFAULT_WILDCARD};

/// Register the address conversion filters available to command templates
pub fn register(tera: &mut Tera) {
    tera.register_filter("cidr_to_netmask", cidr_to_netmask);
    tera.register_filter("ip_from_cidr", ip_from_cidr);
    tera.register_filter("netmask_from_cidr", netmask_from_cidr);
    tera.register_filter("wildcard_from_cidr", wildcard_from_cidr);
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

/// Prefix length of a CIDR string, if it has a usable one
fn cidr_prefix(value: &Value) -> Option<u8> {
    let s = text(value);
    let (_, prefix) = s.split_once('/')?;
    net::parse_prefix(prefix)
}

/// `24 | cidr_to_netmask` -> `255.255.255.0`
fn cidr_to_netmask(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = text(value);
    let mask = s
        .trim_start_matches('/')
        .parse::<u8>()
        .ok()
        .and_then(net::prefix_to_netmask)
        .unwrap_or_else(|| DEFAULT_NETMASK.to_string());
    Ok(Value::String(mask))
}

/// `"10.0.0.1/24" | ip_from_cidr` -> `10.0.0.1`
fn ip_from_cidr(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = text(value);
    let ip = match s.split_once('/') {
        Some((ip, _)) => ip.trim().to_string(),
        None => s,
    };
    Ok(Value::String(ip))
}

/// `"10.0.0.1/24" | netmask_from_cidr` -> `255.255.255.0`
fn netmask_from_cidr(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let mask = cidr_prefix(value)
        .and_then(net::prefix_to_netmask)
        .unwrap_or_else(|| DEFAULT_NETMASK.to_string());
    Ok(Value::String(mask))
}

/// `"10.0.0.0/8" | wildcard_from_cidr` -> `0.255.255.255`
fn wildcard_from_cidr(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let wildcard = cidr_prefix(value)
        .and_then(net::prefix_to_netmask)
        .and_then(|mask| net::netmask_to_wildcard(&mask))
        .unwrap_or_else(|| DEFAULT_WILDCARD.to_string());
    Ok(Value::String(wildcard))
}
