mod parameters;
mod templates;

pub use parameters::*;
pub use templates::*;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Vendor identifies a supported device family. It carries no behaviour;
/// vendor-specific formatting lives in `pipeline::dialect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    Huawei,
    H3c,
    Ruijie,
    Cisco,
}

impl Vendor {
    pub const ALL: [Vendor; 4] = [Vendor::Huawei, Vendor::H3c, Vendor::Ruijie, Vendor::Cisco];

    /// Lowercase id, also the template document file stem
    pub fn id(self) -> &'static str {
        match self {
            Vendor::Huawei => "huawei",
            Vendor::H3c => "h3c",
            Vendor::Ruijie => "ruijie",
            Vendor::Cisco => "cisco",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Vendor::Huawei => "Huawei",
            Vendor::H3c => "H3C",
            Vendor::Ruijie => "Ruijie",
            Vendor::Cisco => "Cisco",
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Vendor {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Vendor::ALL
            .into_iter()
            .find(|v| v.id() == key)
            .ok_or_else(|| UnknownKey::new("vendor", s))
    }
}

/// ConfigType is the closed set of configuration kinds a template can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigType {
    VlanManagement,
    InterfaceConfig,
    PortAggregation,
    DhcpService,
    StaticRoute,
    InterfaceIp,
    StpConfig,
    OspfConfig,
    VrrpConfig,
    BfdConfig,
    VlanCompleteConfig,
}

impl ConfigType {
    pub const ALL: [ConfigType; 11] = [
        ConfigType::VlanManagement,
        ConfigType::InterfaceConfig,
        ConfigType::PortAggregation,
        ConfigType::DhcpService,
        ConfigType::StaticRoute,
        ConfigType::InterfaceIp,
        ConfigType::StpConfig,
        ConfigType::OspfConfig,
        ConfigType::VrrpConfig,
        ConfigType::BfdConfig,
        ConfigType::VlanCompleteConfig,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ConfigType::VlanManagement => "vlan_management",
            ConfigType::InterfaceConfig => "interface_config",
            ConfigType::PortAggregation => "port_aggregation",
            ConfigType::DhcpService => "dhcp_service",
            ConfigType::StaticRoute => "static_route",
            ConfigType::InterfaceIp => "interface_ip",
            ConfigType::StpConfig => "stp_config",
            ConfigType::OspfConfig => "ospf_config",
            ConfigType::VrrpConfig => "vrrp_config",
            ConfigType::BfdConfig => "bfd_config",
            ConfigType::VlanCompleteConfig => "vlan_complete_config",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ConfigType::VlanManagement => "VLAN management",
            ConfigType::InterfaceConfig => "Interface configuration",
            ConfigType::PortAggregation => "Port aggregation",
            ConfigType::DhcpService => "DHCP service",
            ConfigType::StaticRoute => "Static route",
            ConfigType::InterfaceIp => "Interface IP",
            ConfigType::StpConfig => "STP configuration",
            ConfigType::OspfConfig => "OSPF configuration",
            ConfigType::VrrpConfig => "VRRP configuration",
            ConfigType::BfdConfig => "BFD configuration",
            ConfigType::VlanCompleteConfig => "Complete VLAN configuration",
        }
    }
}

impl fmt::Display for ConfigType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ConfigType {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        ConfigType::ALL
            .into_iter()
            .find(|t| t.id() == key)
            .ok_or_else(|| UnknownKey::new("config type", s))
    }
}

/// Returned when a vendor or config type id does not name a known variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownKey {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownKey {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// GenerateRequest is the JSON body of `POST /api/generate`
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub config_type: String,
    #[serde(default)]
    pub parameters: serde_json::Map<String, serde_json::Value>,
}

/// GenerateResponse is the success result of one generation
#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub commands: Vec<String>,
    pub vendor: Vendor,
    pub config_type: ConfigType,
    pub parameters: ParameterSet,
}

/// FailureResponse mirrors the `{error, details?}` shape returned on failure
#[derive(Debug, Clone, Serialize)]
pub struct FailureResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl FailureResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: Vec<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            details: Some(details),
        }
    }
}

/// ValidateResponse is returned by `POST /api/validate`
#[derive(Debug, Clone, Serialize)]
pub struct ValidateResponse {
    pub success: bool,
    pub errors: Vec<String>,
}

/// VendorEntry describes one vendor for the selection list
#[derive(Debug, Clone, Serialize)]
pub struct VendorEntry {
    pub value: Vendor,
    pub name: &'static str,
    pub config_type_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct VendorsResponse {
    pub success: bool,
    pub vendors: Vec<VendorEntry>,
}

/// ConfigTypeEntry pairs a config type id with its display name
#[derive(Debug, Clone, Serialize)]
pub struct ConfigTypeEntry {
    pub value: ConfigType,
    pub name: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigTypesResponse {
    pub success: bool,
    pub config_types: Vec<ConfigTypeEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateInfoResponse {
    pub success: bool,
    pub template_info: TemplateInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_parse() {
        assert_eq!("huawei".parse::<Vendor>().unwrap(), Vendor::Huawei);
        assert_eq!(" H3C ".parse::<Vendor>().unwrap(), Vendor::H3c);
        assert!("juniper".parse::<Vendor>().is_err());
    }

    #[test]
    fn test_config_type_ids_round_trip() {
        for ct in ConfigType::ALL {
            assert_eq!(ct.id().parse::<ConfigType>().unwrap(), ct);
            let json = serde_json::to_string(&ct).unwrap();
            assert_eq!(json, format!("\"{}\"", ct.id()));
        }
    }

    #[test]
    fn test_unknown_config_type_message() {
        let err = "acl_config".parse::<ConfigType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown config type: acl_config");
    }
}
