use std::env;

use crate::models::Vendor;
use crate::utils::ports::{
    ExpandBounds, DEFAULT_MAX_MEMBERS, DEFAULT_MAX_SUBSLOT, DEFAULT_PORTS_PER_SLOT,
    DEFAULT_PORTS_PER_SUBSLOT,
};

/// Config holds all application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub templates_dir: String,
    pub supported_vendors: Vec<Vendor>,
    pub ports_per_subslot: u32,
    pub max_subslot: u32,
    pub ports_per_slot: u32,
    pub max_expanded_ports: usize,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn load() -> Self {
        Self {
            listen_addr: get_env("LISTEN_ADDR", "0.0.0.0:5000"),
            templates_dir: get_env("TEMPLATES_DIR", "config_templates"),
            supported_vendors: parse_vendors(&get_env("SUPPORTED_VENDORS", "huawei,h3c,ruijie,cisco")),
            ports_per_subslot: get_env("PORTS_PER_SUBSLOT", "48")
                .parse()
                .unwrap_or(DEFAULT_PORTS_PER_SUBSLOT),
            max_subslot: get_env("MAX_SUBSLOT", "8")
                .parse()
                .unwrap_or(DEFAULT_MAX_SUBSLOT),
            ports_per_slot: get_env("PORTS_PER_SLOT", "48")
                .parse()
                .unwrap_or(DEFAULT_PORTS_PER_SLOT),
            max_expanded_ports: get_env("MAX_EXPANDED_PORTS", "4096")
                .parse()
                .unwrap_or(DEFAULT_MAX_MEMBERS),
        }
    }

    /// Port range expansion bounds
    pub fn expand_bounds(&self) -> ExpandBounds {
        ExpandBounds {
            ports_per_subslot: self.ports_per_subslot,
            max_subslot: self.max_subslot,
            ports_per_slot: self.ports_per_slot,
            max_members: self.max_expanded_ports,
        }
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Comma-separated vendor ids; unknown ids are logged and ignored
fn parse_vendors(list: &str) -> Vec<Vendor> {
    let mut vendors = Vec::new();
    for id in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match id.parse::<Vendor>() {
            Ok(v) if !vendors.contains(&v) => vendors.push(v),
            Ok(_) => {}
            Err(e) => tracing::warn!("SUPPORTED_VENDORS: {}", e),
        }
    }
    vendors
}
