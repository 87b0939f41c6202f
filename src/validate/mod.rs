//! Parameter validation. Each config type has a table of field rules plus a
//! few rules that span fields. Every rule runs and contributes at most one
//! message, so the caller sees all problems at once.

mod rules;

use regex_lite::Regex;

use crate::models::{ConfigType, RawParameters, Vendor};
use crate::utils::net;
use crate::utils::ports::PortExpander;
use crate::utils::vlans::{VlanList, MAX_VLAN, MIN_VLAN};
use rules::{Check, FieldRule};

const MAX_NAME_LEN: usize = 32;

/// Interface name grammars: slot/subslot/port, slot/port, and named logical
/// interfaces such as `Vlanif10` or `Eth-Trunk1`
const INTERFACE_PATTERNS: &[&str] = &[
    r"^(GigabitEthernet|TenGigabitEthernet|Ten-GigabitEthernet|XGigabitEthernet|FortyGigabitEthernet|HundredGigE|HundredGigabitEthernet|25GE|40GE|100GE|10GE|GE|FE)\d+/\d+/\d+$",
    r"^(GigabitEthernet|TenGigabitEthernet|XGigabitEthernet|FastEthernet|Ethernet|40GE|100GE|10GE|GE|FE)\d+/\d+$",
    r"^(Vlanif|vlanif|Vlan-interface|Vlan|vlan|VLAN|LoopBack|Loopback|Eth-Trunk|Bridge-Aggregation|Port-channel|AggregatePort|aggregateport)\d+$",
];

const MAPPING_PATTERN: &str = r"^\d+:\d+(,\d+)*(;\d+:\d+(,\d+)*)*$";

#[derive(Debug, Clone)]
pub struct Validator {
    interfaces: Vec<Regex>,
    range_end: Option<Regex>,
    mapping: Option<Regex>,
    expander: PortExpander,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    pub fn new() -> Self {
        Self::with_expander(PortExpander::default())
    }

    /// Validator whose range size limit follows `expander`
    pub fn with_expander(expander: PortExpander) -> Self {
        Self {
            interfaces: INTERFACE_PATTERNS
                .iter()
                .filter_map(|p| Regex::new(p).ok())
                .collect(),
            range_end: Regex::new(r"^\d+(/\d+){0,2}$").ok(),
            mapping: Regex::new(MAPPING_PATTERN).ok(),
            expander,
        }
    }

    /// Check raw parameters for a config type. Returns whether they are
    /// acceptable together with one message per failed rule.
    pub fn validate(
        &self,
        config_type: ConfigType,
        vendor: Vendor,
        raw: &RawParameters,
    ) -> (bool, Vec<String>) {
        let mut errors: Vec<String> = rules::field_rules(config_type)
            .iter()
            .filter_map(|rule| self.check_field(rule, raw))
            .collect();

        errors.extend(
            rules::cross_rules(config_type)
                .iter()
                .filter_map(|rule| rule(vendor, raw)),
        );

        (errors.is_empty(), errors)
    }

    fn check_field(&self, rule: &FieldRule, raw: &RawParameters) -> Option<String> {
        let Some(value) = raw.text(rule.field) else {
            return rule.required.then(|| format!("{} is required", rule.field));
        };
        self.check_value(rule.check, &value)
            .err()
            .map(|reason| format!("{}: {}", rule.field, reason))
    }

    fn check_value(&self, check: Check, value: &str) -> Result<(), String> {
        match check {
            Check::VlanId => {
                let id = parse_number(value)?;
                in_range(id, i64::from(MIN_VLAN), i64::from(MAX_VLAN))
            }
            Check::VlanList => VlanList::parse(value).map(|_| ()).map_err(|e| e.to_string()),
            Check::Number { min, max } => in_range(parse_number(value)?, min, max),
            Check::Step { min, max, step } => {
                let n = parse_number(value)?;
                in_range(n, min, max)?;
                if n % step != 0 {
                    return Err(format!("{} is not a multiple of {}", n, step));
                }
                Ok(())
            }
            Check::Interface => self.check_interfaces(value),
            Check::Ip => {
                if net::is_valid_ipv4(value) {
                    Ok(())
                } else {
                    Err(format!("'{}' is not an IPv4 address", value))
                }
            }
            Check::IpOrCidr => {
                if net::is_valid_ip_or_cidr(value) {
                    Ok(())
                } else {
                    Err(format!(
                        "'{}' is not an IPv4 address, expected e.g. 192.168.1.1 or 192.168.1.0/24",
                        value
                    ))
                }
            }
            Check::Mask => check_mask(value),
            Check::IpList => value
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|s| !s.is_empty())
                .find(|ip| !net::is_valid_ipv4(ip))
                .map_or(Ok(()), |bad| Err(format!("'{}' is not an IPv4 address", bad))),
            Check::ExcludedList => check_excluded(value),
            Check::AreaList => check_areas(value),
            Check::Name => check_name(value),
            Check::Text { max_len } => {
                if value.chars().count() > max_len {
                    Err(format!("must be at most {} characters", max_len))
                } else {
                    Ok(())
                }
            }
            Check::Choice(options) => {
                if options.iter().any(|o| o.eq_ignore_ascii_case(value)) {
                    Ok(())
                } else {
                    Err(format!("'{}' must be one of {}", value, options.join(", ")))
                }
            }
            Check::Mapping => match &self.mapping {
                Some(re) if !re.is_match(value) => Err(format!(
                    "'{}' must look like 1:10,20;2:30,40",
                    value
                )),
                _ => Ok(()),
            },
            Check::Lease => check_lease(value),
            Check::Vlanif => {
                let id = value
                    .strip_prefix("Vlanif")
                    .or_else(|| value.strip_prefix("vlanif"));
                match id {
                    Some(n) if !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()) => Ok(()),
                    _ => Err(format!("'{}' must look like Vlanif100", value)),
                }
            }
        }
    }

    /// Interface notation: comma-separated names or ranges. A range is
    /// accepted when its left endpoint is a valid name, its right endpoint
    /// is a port number or path, and it stays within the expander's limit.
    fn check_interfaces(&self, notation: &str) -> Result<(), String> {
        let fragments: Vec<&str> = notation
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .collect();
        if fragments.is_empty() {
            return Err("no interface given".to_string());
        }

        for fragment in fragments {
            if self.is_interface(fragment) {
                continue;
            }
            let is_range = fragment.rsplit_once('-').is_some_and(|(left, right)| {
                self.is_interface(left)
                    && self.range_end.as_ref().is_some_and(|re| re.is_match(right))
            });
            if !is_range {
                return Err(format!("'{}' is not a recognised interface name or range", fragment));
            }
            self.expander.try_expand(fragment).map_err(|e| e.to_string())?;
        }
        Ok(())
    }

    fn is_interface(&self, name: &str) -> bool {
        self.interfaces.iter().any(|re| re.is_match(name))
    }
}

fn parse_number(value: &str) -> Result<i64, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))
}

fn in_range(n: i64, min: i64, max: i64) -> Result<(), String> {
    if (min..=max).contains(&n) {
        Ok(())
    } else {
        Err(format!("{} is outside {}-{}", n, min, max))
    }
}

fn check_name(value: &str) -> Result<(), String> {
    if value.chars().count() > MAX_NAME_LEN {
        return Err(format!("must be at most {} characters", MAX_NAME_LEN));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err("may only contain letters, digits, '_' and '-'".to_string());
    }
    Ok(())
}

fn check_mask(value: &str) -> Result<(), String> {
    let valid = if value.contains('.') {
        net::parse_ipv4(value).and_then(net::netmask_to_prefix).is_some()
    } else {
        value
            .trim_start_matches('/')
            .parse::<u8>()
            .is_ok_and(|len| len <= 32)
    };
    if valid {
        Ok(())
    } else {
        Err(format!("'{}' is not a netmask or prefix length 0-32", value))
    }
}

fn check_excluded(value: &str) -> Result<(), String> {
    for part in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let ok = match part.split_once('-') {
            Some((start, end)) => match (net::parse_ipv4(start), net::parse_ipv4(end)) {
                (Some(s), Some(e)) => s <= e,
                _ => false,
            },
            None => net::is_valid_ipv4(part),
        };
        if !ok {
            return Err(format!("'{}' is not an address or ascending address range", part));
        }
    }
    Ok(())
}

fn check_areas(value: &str) -> Result<(), String> {
    for entry in value.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let ok = entry.split_once(':').is_some_and(|(area, cidr)| {
            let area = area.trim();
            let area_ok = area.parse::<u32>().is_ok() || net::is_valid_ipv4(area);
            area_ok && net::is_valid_ip_or_cidr(cidr)
        });
        if !ok {
            return Err(format!("'{}' must look like 0:192.168.1.0/24", entry));
        }
    }
    Ok(())
}

fn check_lease(value: &str) -> Result<(), String> {
    if value.eq_ignore_ascii_case("infinite") || value.eq_ignore_ascii_case("unlimited") {
        return Ok(());
    }
    let parts: Vec<&str> = value.split_whitespace().collect();
    let [days, hours, minutes] = parts.as_slice() else {
        return Err("must be 'days hours minutes', e.g. 1 0 0".to_string());
    };
    let (Ok(days), Ok(hours), Ok(minutes)) =
        (days.parse::<u32>(), hours.parse::<u32>(), minutes.parse::<u32>())
    else {
        return Err("days, hours and minutes must be numbers".to_string());
    };
    if days > 365 || hours > 23 || minutes > 59 {
        return Err("days, hours and minutes must be within 0-365, 0-23 and 0-59".to_string());
    }
    Ok(())
}
