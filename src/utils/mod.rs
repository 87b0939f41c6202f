pub mod net;
pub mod ports;
pub mod vlans;

use crate::models::{ConfigType, ParameterSet, Vendor};

/// Make a string safe to use as a download filename.
/// Replaces path and shell-hostile characters and collapses whitespace.
pub fn sanitize_filename(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let collapsed = replaced.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned = collapsed.trim_matches('.');

    if cleaned.is_empty() {
        "config".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Join commands into file content, skipping blank entries
pub fn format_command_list(commands: &[String]) -> String {
    commands
        .iter()
        .filter(|c| !c.trim().is_empty())
        .map(|c| c.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

/// One-line description of a generation request, used in logs
pub fn config_summary(vendor: Vendor, config_type: ConfigType, params: &ParameterSet) -> String {
    let mut parts = vec![
        format!("vendor: {}", vendor.display_name()),
        format!("type: {}", config_type.display_name()),
    ];

    let key_params: Vec<String> = [
        ("vlan_id", "VLAN"),
        ("interface", "interface"),
        ("interfaces", "members"),
        ("pool_name", "pool"),
        ("destination", "destination"),
        ("process_id", "process"),
        ("vrid", "VRID"),
    ]
    .iter()
    .filter_map(|(key, label)| params.text(key).map(|v| format!("{} {}", label, v)))
    .collect();

    if !key_params.is_empty() {
        parts.push(format!("params: {}", key_params.join(", ")));
    }

    let subnet = params
        .text("ip_address")
        .zip(params.text("subnet_mask"))
        .and_then(|(ip, mask)| net::network_info(&ip, &mask));
    if let Some(info) = subnet {
        parts.push(format!(
            "subnet: {}/{} ({} hosts)",
            info.network, info.prefix_length, info.host_count
        ));
    }

    parts.join(" | ")
}
