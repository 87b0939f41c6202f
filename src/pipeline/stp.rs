use serde::Serialize;

use super::{coerce_flag, parse_vlans, Context, Normalizer};
use crate::error::GuardError;
use crate::models::{ParameterSet, RawParameters};

const FLAGS: [&str; 5] = [
    "global_enable",
    "edge_port",
    "bpdu_protection",
    "root_protection",
    "loop_protection",
];

/// One MST instance with the VLANs mapped to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstanceVlans {
    pub instance: String,
    pub vlans: String,
    pub vlan_batch: String,
}

pub(super) struct Stp;

impl Normalizer for Stp {
    fn normalize(
        &self,
        ctx: &Context<'_>,
        raw: &RawParameters,
        out: &mut ParameterSet,
    ) -> Result<(), GuardError> {
        for flag in FLAGS {
            coerce_flag(raw, flag, out);
        }

        if let Some(role) = raw.text("root_bridge_config") {
            let role = role.to_ascii_lowercase();
            out.insert("root_primary", role == "primary");
            out.insert("root_secondary", role == "secondary");
        }

        check_step(raw, "bridge_priority", 4096)?;
        check_step(raw, "port_priority", 16)?;

        if let Some(mapping) = raw.text("instance_vlan_mapping") {
            let mut instances = Vec::new();
            for entry in mapping.split(';') {
                let Some((instance, vlans)) = entry.split_once(':') else {
                    continue;
                };
                let vlans = vlans.trim();
                let list = parse_vlans("instance_vlan_mapping", vlans)?;
                instances.push(InstanceVlans {
                    instance: instance.trim().to_string(),
                    vlans: vlans.to_string(),
                    vlan_batch: ctx.dialect.format_vlan_batch(&list),
                });
            }
            out.insert_serialized("instance_vlan_list", &instances);
        }

        ctx.expand_ports(raw, "interface", "port_list", out)?;
        ctx.expand_ports(raw, "edge_port_interface", "edge_port_list", out)?;
        ctx.expand_ports(raw, "root_protection_interface", "root_protection_port_list", out)?;
        ctx.expand_ports(raw, "loop_protection_interface", "loop_protection_port_list", out)?;
        Ok(())
    }
}

/// Priorities are only configurable in fixed increments
fn check_step(raw: &RawParameters, key: &str, step: u32) -> Result<(), GuardError> {
    let Some(value) = raw.text(key) else {
        return Ok(());
    };
    let priority: u32 = value
        .parse()
        .map_err(|_| GuardError::new(format!("{} must be a number, got {}", key, value)))?;
    if priority % step != 0 {
        return Err(GuardError::new(format!(
            "{} must be a multiple of {}, got {}",
            key, step, priority
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::tests::raw;
    use crate::models::{ConfigType, Vendor};
    use crate::pipeline::Pipeline;
    use serde_json::json;

    #[test]
    fn test_flags_and_root_role() {
        let params = Pipeline::default()
            .normalize(
                ConfigType::StpConfig,
                Vendor::Huawei,
                &raw(&[
                    ("stp_mode", "mstp"),
                    ("global_enable", "true"),
                    ("edge_port", "false"),
                    ("root_bridge_config", "secondary"),
                ]),
            )
            .unwrap();
        assert_eq!(params.get("global_enable"), Some(&json!(true)));
        assert_eq!(params.get("edge_port"), Some(&json!(false)));
        assert_eq!(params.get("root_primary"), Some(&json!(false)));
        assert_eq!(params.get("root_secondary"), Some(&json!(true)));
        assert!(!params.contains("bpdu_protection"));
    }

    #[test]
    fn test_priority_guards() {
        let pipeline = Pipeline::default();
        let err = pipeline
            .normalize(ConfigType::StpConfig, Vendor::H3c, &raw(&[("bridge_priority", "4097")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "bridge_priority must be a multiple of 4096, got 4097");

        let err = pipeline
            .normalize(ConfigType::StpConfig, Vendor::H3c, &raw(&[("port_priority", "20")]))
            .unwrap_err();
        assert!(err.to_string().contains("multiple of 16"));

        assert!(pipeline
            .normalize(
                ConfigType::StpConfig,
                Vendor::H3c,
                &raw(&[("bridge_priority", "8192"), ("port_priority", "128")]),
            )
            .is_ok());
    }

    #[test]
    fn test_instance_mapping_and_port_lists() {
        let params = Pipeline::default()
            .normalize(
                ConfigType::StpConfig,
                Vendor::Cisco,
                &raw(&[
                    ("instance_vlan_mapping", "1:10,20,21;2:30"),
                    ("edge_port_interface", "GigabitEthernet0/1-2"),
                ]),
            )
            .unwrap();
        assert_eq!(
            params.get("instance_vlan_list"),
            Some(&json!([
                { "instance": "1", "vlans": "10,20,21", "vlan_batch": "10,20-21" },
                { "instance": "2", "vlans": "30", "vlan_batch": "30" },
            ]))
        );
        assert_eq!(
            params.get("edge_port_list"),
            Some(&json!(["GigabitEthernet0/1", "GigabitEthernet0/2"]))
        );
        assert!(!params.contains("port_list"));
    }
}
