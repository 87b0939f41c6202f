use crate::models::Vendor;
use crate::utils::vlans::VlanList;

/// VendorDialect captures the few places where vendors spell the same
/// derived value differently.
pub trait VendorDialect: Sync {
    /// Logical interface name of link aggregation group `lag_id`
    fn aggregation_interface(&self, lag_id: &str) -> String;

    /// VLAN list as written after `vlan batch` / `switchport trunk allowed vlan`
    fn format_vlan_batch(&self, vlans: &VlanList) -> String;

    /// DHCP lease argument for a finite lease
    fn format_lease_time(&self, days: u16, hours: u8, minutes: u8) -> String;

    /// DHCP lease argument for a lease that never expires
    fn infinite_lease(&self) -> &'static str;
}

struct Huawei;
struct H3c;
struct Ruijie;
struct Cisco;

impl VendorDialect for Huawei {
    fn aggregation_interface(&self, lag_id: &str) -> String {
        format!("Eth-Trunk{}", lag_id)
    }

    fn format_vlan_batch(&self, vlans: &VlanList) -> String {
        vlans.to_range_phrase()
    }

    fn format_lease_time(&self, days: u16, hours: u8, minutes: u8) -> String {
        format!("day {} hour {} minute {}", days, hours, minutes)
    }

    fn infinite_lease(&self) -> &'static str {
        "unlimited"
    }
}

impl VendorDialect for H3c {
    fn aggregation_interface(&self, lag_id: &str) -> String {
        format!("Bridge-Aggregation{}", lag_id)
    }

    fn format_vlan_batch(&self, vlans: &VlanList) -> String {
        vlans.to_range_phrase()
    }

    fn format_lease_time(&self, days: u16, hours: u8, minutes: u8) -> String {
        format!("day {} hour {} minute {}", days, hours, minutes)
    }

    fn infinite_lease(&self) -> &'static str {
        "unlimited"
    }
}

impl VendorDialect for Ruijie {
    fn aggregation_interface(&self, lag_id: &str) -> String {
        format!("aggregateport{}", lag_id)
    }

    fn format_vlan_batch(&self, vlans: &VlanList) -> String {
        vlans.to_compact()
    }

    fn format_lease_time(&self, days: u16, hours: u8, minutes: u8) -> String {
        format!("{} {} {}", days, hours, minutes)
    }

    fn infinite_lease(&self) -> &'static str {
        "infinite"
    }
}

impl VendorDialect for Cisco {
    fn aggregation_interface(&self, lag_id: &str) -> String {
        format!("Port-channel{}", lag_id)
    }

    fn format_vlan_batch(&self, vlans: &VlanList) -> String {
        vlans.to_compact()
    }

    fn format_lease_time(&self, days: u16, hours: u8, minutes: u8) -> String {
        format!("{} {} {}", days, hours, minutes)
    }

    fn infinite_lease(&self) -> &'static str {
        "infinite"
    }
}

pub fn for_vendor(vendor: Vendor) -> &'static dyn VendorDialect {
    match vendor {
        Vendor::Huawei => &Huawei,
        Vendor::H3c => &H3c,
        Vendor::Ruijie => &Ruijie,
        Vendor::Cisco => &Cisco,
    }
}
