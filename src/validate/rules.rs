use crate::models::{ConfigType, RawParameters, Vendor};

/// What a single field must look like
#[derive(Debug, Clone, Copy)]
pub(super) enum Check {
    /// One VLAN id
    VlanId,
    /// VLAN list notation: `10`, `10,20`, `30-40`
    VlanList,
    Number { min: i64, max: i64 },
    /// Number within bounds that must also be a multiple of `step`
    Step { min: i64, max: i64, step: i64 },
    /// Interface name, list or range notation
    Interface,
    Ip,
    IpOrCidr,
    /// Dotted netmask or prefix length
    Mask,
    /// Addresses separated by commas or spaces
    IpList,
    /// `a.b.c.d` or `a.b.c.d-e.f.g.h`, comma separated
    ExcludedList,
    /// `area:cidr`, comma separated
    AreaList,
    /// Up to 32 letters, digits, `_` or `-`
    Name,
    Text { max_len: usize },
    Choice(&'static [&'static str]),
    /// `instance:vlan,vlan;instance:vlan`
    Mapping,
    /// `days hours minutes` or `infinite`
    Lease,
    /// `Vlanif<N>`
    Vlanif,
}

#[derive(Debug, Clone, Copy)]
pub(super) struct FieldRule {
    pub field: &'static str,
    pub required: bool,
    pub check: Check,
}

const fn req(field: &'static str, check: Check) -> FieldRule {
    FieldRule {
        field,
        required: true,
        check,
    }
}

const fn opt(field: &'static str, check: Check) -> FieldRule {
    FieldRule {
        field,
        required: false,
        check,
    }
}

/// A rule spanning several fields
pub(super) type CrossRule = fn(Vendor, &RawParameters) -> Option<String>;

const PORT_MODES: &[&str] = &["access", "trunk"];
const AGGREGATION_MODES: &[&str] = &["static", "lacp"];
const DHCP_TYPES: &[&str] = &["global", "interface"];
const STP_MODES: &[&str] = &["stp", "rstp", "mstp"];
const ROOT_ROLES: &[&str] = &["none", "primary", "secondary"];
const OSPF_AUTH: &[&str] = &["simple", "md5"];
const FLAG: &[&str] = &["true", "false", "on", "off", "yes", "no", "1", "0"];

const DESCRIPTION: Check = Check::Text { max_len: 80 };

static VLAN_MANAGEMENT: &[FieldRule] = &[
    req("vlan_id", Check::VlanList),
    opt("vlan_name", Check::Name),
    opt("description", DESCRIPTION),
];

static INTERFACE_CONFIG: &[FieldRule] = &[
    req("interface", Check::Interface),
    opt("port_mode", Check::Choice(PORT_MODES)),
    opt("vlan_id", Check::VlanId),
    opt("allowed_vlans", Check::VlanList),
    opt("native_vlan", Check::VlanId),
    opt("description", DESCRIPTION),
];

static PORT_AGGREGATION: &[FieldRule] = &[
    req("interfaces", Check::Interface),
    opt("lag_id", Check::Number { min: 1, max: 128 }),
    opt("mode", Check::Choice(AGGREGATION_MODES)),
    opt("description", DESCRIPTION),
];

static DHCP_SERVICE: &[FieldRule] = &[
    opt("dhcp_type", Check::Choice(DHCP_TYPES)),
    opt("pool_name", Check::Name),
    opt("network", Check::IpOrCidr),
    opt("mask", Check::Mask),
    opt("gateway", Check::Ip),
    opt("dns_servers", Check::IpList),
    opt("excluded_addresses", Check::ExcludedList),
    opt("lease_time", Check::Lease),
    opt("domain_name", Check::Text { max_len: 64 }),
    opt("vlanif", Check::Vlanif),
    opt("interface_ip", Check::IpOrCidr),
];

static STATIC_ROUTE: &[FieldRule] = &[
    req("destination", Check::IpOrCidr),
    opt("mask", Check::Mask),
    req("next_hop", Check::Ip),
    opt("preference", Check::Number { min: 1, max: 255 }),
    opt("description", DESCRIPTION),
];

static INTERFACE_IP: &[FieldRule] = &[
    req("interface", Check::Interface),
    req("ip_address", Check::IpOrCidr),
    opt("subnet_mask", Check::Mask),
    opt("description", DESCRIPTION),
];

static STP_CONFIG: &[FieldRule] = &[
    opt("stp_mode", Check::Choice(STP_MODES)),
    opt("global_enable", Check::Choice(FLAG)),
    opt("bridge_priority", Check::Step { min: 0, max: 61440, step: 4096 }),
    opt("port_priority", Check::Step { min: 0, max: 240, step: 16 }),
    opt("hello_time", Check::Number { min: 1, max: 10 }),
    opt("forward_delay", Check::Number { min: 4, max: 30 }),
    opt("max_age", Check::Number { min: 6, max: 40 }),
    opt("instance_id", Check::Number { min: 1, max: 64 }),
    opt("revision_level", Check::Number { min: 0, max: 65535 }),
    opt("region_name", Check::Name),
    opt("vlan_list", Check::VlanList),
    opt("instance_vlan_mapping", Check::Mapping),
    opt("root_bridge_config", Check::Choice(ROOT_ROLES)),
    opt("interface", Check::Interface),
    opt("port_cost", Check::Number { min: 1, max: 200_000_000 }),
    opt("edge_port", Check::Choice(FLAG)),
    opt("edge_port_interface", Check::Interface),
    opt("bpdu_protection", Check::Choice(FLAG)),
    opt("root_protection", Check::Choice(FLAG)),
    opt("root_protection_interface", Check::Interface),
    opt("loop_protection", Check::Choice(FLAG)),
    opt("loop_protection_interface", Check::Interface),
];

static OSPF_CONFIG: &[FieldRule] = &[
    req("process_id", Check::Number { min: 1, max: 65535 }),
    opt("router_id", Check::Ip),
    opt("areas", Check::AreaList),
    opt("interface_name", Check::Interface),
    opt("cost", Check::Number { min: 1, max: 65535 }),
    opt("interface_auth_interface", Check::Interface),
    opt("auth_type", Check::Choice(OSPF_AUTH)),
    opt("auth_key_id", Check::Number { min: 1, max: 255 }),
    opt("auth_key", Check::Name),
];

static VRRP_CONFIG: &[FieldRule] = &[
    req("interface", Check::Interface),
    req("vrid", Check::Number { min: 1, max: 255 }),
    req("virtual_ip", Check::IpOrCidr),
    opt("priority", Check::Number { min: 1, max: 254 }),
    opt("advertise_interval", Check::Number { min: 1, max: 255 }),
    opt("preempt", Check::Choice(FLAG)),
    opt("preempt_delay", Check::Number { min: 0, max: 3600 }),
];

static BFD_CONFIG: &[FieldRule] = &[
    req("session_name", Check::Name),
    req("peer_ip", Check::IpOrCidr),
    opt("source_ip", Check::Ip),
    opt("interface", Check::Interface),
    req("local_discriminator", Check::Number { min: 1, max: 16384 }),
    req("remote_discriminator", Check::Number { min: 1, max: 16384 }),
    opt("min_tx_interval", Check::Number { min: 10, max: 1000 }),
    opt("min_rx_interval", Check::Number { min: 10, max: 1000 }),
    opt("detect_multiplier", Check::Number { min: 3, max: 50 }),
];

static VLAN_COMPLETE_CONFIG: &[FieldRule] = &[
    req("vlan_id", Check::VlanList),
    opt("vlan_name", Check::Name),
    opt("description", DESCRIPTION),
    opt("interface", Check::Interface),
    opt("port_mode", Check::Choice(PORT_MODES)),
    opt("allowed_vlans", Check::VlanList),
    opt("configure_vlan_ip", Check::Choice(FLAG)),
    opt("vlan_ip_address", Check::IpOrCidr),
];

pub(super) fn field_rules(config_type: ConfigType) -> &'static [FieldRule] {
    match config_type {
        ConfigType::VlanManagement => VLAN_MANAGEMENT,
        ConfigType::InterfaceConfig => INTERFACE_CONFIG,
        ConfigType::PortAggregation => PORT_AGGREGATION,
        ConfigType::DhcpService => DHCP_SERVICE,
        ConfigType::StaticRoute => STATIC_ROUTE,
        ConfigType::InterfaceIp => INTERFACE_IP,
        ConfigType::StpConfig => STP_CONFIG,
        ConfigType::OspfConfig => OSPF_CONFIG,
        ConfigType::VrrpConfig => VRRP_CONFIG,
        ConfigType::BfdConfig => BFD_CONFIG,
        ConfigType::VlanCompleteConfig => VLAN_COMPLETE_CONFIG,
    }
}

static INTERFACE_CONFIG_CROSS: &[CrossRule] = &[access_port_needs_vlan];
static DHCP_SERVICE_CROSS: &[CrossRule] = &[dhcp_pool_mode];
static OSPF_CONFIG_CROSS: &[CrossRule] = &[ospf_auth_needs_key];
static BFD_CONFIG_CROSS: &[CrossRule] = &[bfd_discriminators_differ];
static VLAN_COMPLETE_CROSS: &[CrossRule] = &[vlan_ip_needs_address];

pub(super) fn cross_rules(config_type: ConfigType) -> &'static [CrossRule] {
    match config_type {
        ConfigType::InterfaceConfig => INTERFACE_CONFIG_CROSS,
        ConfigType::DhcpService => DHCP_SERVICE_CROSS,
        ConfigType::OspfConfig => OSPF_CONFIG_CROSS,
        ConfigType::BfdConfig => BFD_CONFIG_CROSS,
        ConfigType::VlanCompleteConfig => VLAN_COMPLETE_CROSS,
        _ => &[],
    }
}

fn is_mode(raw: &RawParameters, key: &str, mode: &str) -> bool {
    raw.text(key).is_some_and(|v| v.eq_ignore_ascii_case(mode))
}

fn access_port_needs_vlan(_vendor: Vendor, raw: &RawParameters) -> Option<String> {
    (is_mode(raw, "port_mode", "access") && !raw.has("vlan_id"))
        .then(|| "vlan_id is required for an access port".to_string())
}

/// Huawei can serve DHCP from a VLAN interface instead of a named pool;
/// everything else needs the pool name.
fn dhcp_pool_mode(vendor: Vendor, raw: &RawParameters) -> Option<String> {
    if vendor == Vendor::Huawei && is_mode(raw, "dhcp_type", "interface") {
        return (!raw.has("vlanif"))
            .then(|| "vlanif is required in interface address pool mode".to_string());
    }
    if !raw.has("pool_name") {
        return Some("pool_name is required in global address pool mode".to_string());
    }
    (!raw.has("network")).then(|| "network is required in global address pool mode".to_string())
}

fn ospf_auth_needs_key(_vendor: Vendor, raw: &RawParameters) -> Option<String> {
    (raw.has("auth_type") && !raw.has("auth_key"))
        .then(|| "auth_key is required when auth_type is set".to_string())
}

fn bfd_discriminators_differ(_vendor: Vendor, raw: &RawParameters) -> Option<String> {
    let local = raw.text("local_discriminator")?;
    let remote = raw.text("remote_discriminator")?;
    (local == remote).then(|| "local and remote discriminators must differ".to_string())
}

fn vlan_ip_needs_address(_vendor: Vendor, raw: &RawParameters) -> Option<String> {
    (raw.flag("configure_vlan_ip") && !raw.has("vlan_ip_address"))
        .then(|| "vlan_ip_address is required when configure_vlan_ip is set".to_string())
}
