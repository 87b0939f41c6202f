//! Port and interface range expansion.
//!
//! Turns compact notations such as `GigabitEthernet0/0/1-4,0/1/1-0/1/3`
//! into the explicit list of interface names. A fragment that cannot be
//! understood is emitted verbatim. A range larger than the member limit is
//! an [`ExpandError`] from [`PortExpander::try_expand`]; the lenient
//! [`PortExpander::expand`] logs it and keeps the fragment as written.

use regex_lite::{Captures, Regex};
use std::collections::HashSet;

/// Ports assumed on a subslot when a three-level range walks across it
pub const DEFAULT_PORTS_PER_SUBSLOT: u32 = 48;
/// Highest subslot index assumed on a slot when a range walks across it
pub const DEFAULT_MAX_SUBSLOT: u32 = 8;
/// Ports assumed on a slot when a two-level range walks across it
pub const DEFAULT_PORTS_PER_SLOT: u32 = 48;
/// Largest number of identifiers a single fragment may expand to
pub const DEFAULT_MAX_MEMBERS: usize = 4096;

/// Density assumptions for path ranges that cross slot or subslot
/// boundaries. These are not read from any device: a real chassis may have
/// fewer or more ports than assumed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandBounds {
    pub ports_per_subslot: u32,
    pub max_subslot: u32,
    pub ports_per_slot: u32,
    pub max_members: usize,
}

impl Default for ExpandBounds {
    fn default() -> Self {
        Self {
            ports_per_subslot: DEFAULT_PORTS_PER_SUBSLOT,
            max_subslot: DEFAULT_MAX_SUBSLOT,
            ports_per_slot: DEFAULT_PORTS_PER_SLOT,
            max_members: DEFAULT_MAX_MEMBERS,
        }
    }
}

impl ExpandBounds {
    /// Clamp to values that keep every walk finite and non-empty
    pub fn sanitized(self) -> Self {
        Self {
            ports_per_subslot: self.ports_per_subslot.max(1),
            max_subslot: self.max_subslot,
            ports_per_slot: self.ports_per_slot.max(1),
            max_members: self.max_members.max(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpandError {
    #[error("'{fragment}' expands to more than {limit} interfaces")]
    TooLarge { fragment: String, limit: usize },
}

/// Why a matched range produced no identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Skip {
    /// Numbers that do not fit, or a capture that is missing
    Malformed,
    /// More members than the configured limit
    TooLarge,
}

/// Range shapes in the order they are tried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RangeShape {
    /// `Gi0/0/1-4`
    TrailingNumber,
    /// `Gi0/0/1-0/1/4`
    ThreeLevel,
    /// `Gi0/1-1/4`
    TwoLevel,
    /// `10GE1/0/1-4`
    PathToNumber,
}

const RANGE_PATTERNS: [(RangeShape, &str); 4] = [
    (RangeShape::TrailingNumber, r"^(.+?)(\d+)-(\d+)$"),
    (RangeShape::ThreeLevel, r"^(.+?)(\d+)/(\d+)/(\d+)-(\d+)/(\d+)/(\d+)$"),
    (RangeShape::TwoLevel, r"^(.+?)(\d+)/(\d+)-(\d+)/(\d+)$"),
    (RangeShape::PathToNumber, r"^(.+?)(\d+)/(\d+)/(\d+)-(\d+)$"),
];

/// PortExpander expands port notations using a fixed set of range shapes
#[derive(Debug, Clone)]
pub struct PortExpander {
    bounds: ExpandBounds,
    patterns: Vec<(RangeShape, Regex)>,
}

impl Default for PortExpander {
    fn default() -> Self {
        Self::new(ExpandBounds::default())
    }
}

impl PortExpander {
    pub fn new(bounds: ExpandBounds) -> Self {
        let patterns = RANGE_PATTERNS
            .iter()
            .filter_map(|(shape, pattern)| Regex::new(pattern).ok().map(|re| (*shape, re)))
            .collect();
        Self {
            bounds: bounds.sanitized(),
            patterns,
        }
    }

    pub fn bounds(&self) -> ExpandBounds {
        self.bounds
    }

    /// Expand a comma-separated notation into unique identifiers, keeping
    /// the order in which each identifier first appears. An oversized range
    /// is logged and kept as written.
    pub fn expand(&self, notation: &str) -> Vec<String> {
        let mut ports = UniquePorts::default();
        for fragment in fragments(notation) {
            match self.expand_fragment(fragment) {
                Ok(expanded) => ports.extend(expanded),
                Err(e) => {
                    tracing::debug!("Port range left unexpanded: {}", e);
                    ports.extend([fragment.to_string()]);
                }
            }
        }
        ports.finish()
    }

    /// Like [`expand`](Self::expand), but a range with more members than
    /// the limit is an error instead of a literal.
    pub fn try_expand(&self, notation: &str) -> Result<Vec<String>, ExpandError> {
        let mut ports = UniquePorts::default();
        for fragment in fragments(notation) {
            ports.extend(self.expand_fragment(fragment)?);
        }
        Ok(ports.finish())
    }

    fn expand_fragment(&self, fragment: &str) -> Result<Vec<String>, ExpandError> {
        if !fragment.contains('-') {
            return Ok(vec![fragment.to_string()]);
        }

        let matched = self
            .patterns
            .iter()
            .find_map(|(shape, re)| re.captures(fragment).map(|caps| (*shape, caps)));

        let Some((shape, caps)) = matched else {
            return Ok(vec![fragment.to_string()]);
        };

        let expanded = match shape {
            RangeShape::TrailingNumber => self.trailing_number(&caps),
            RangeShape::ThreeLevel => self.three_level(&caps),
            RangeShape::TwoLevel => self.two_level(&caps),
            RangeShape::PathToNumber => self.path_to_number(&caps),
        };

        match expanded {
            Ok(ports) if !ports.is_empty() => Ok(ports),
            Ok(_) => Ok(vec![fragment.to_string()]),
            Err(Skip::Malformed) => {
                tracing::debug!("Port range {} left unexpanded", fragment);
                Ok(vec![fragment.to_string()])
            }
            Err(Skip::TooLarge) => Err(ExpandError::TooLarge {
                fragment: fragment.to_string(),
                limit: self.bounds.max_members,
            }),
        }
    }

    fn trailing_number(&self, caps: &Captures) -> Result<Vec<String>, Skip> {
        let prefix = caps.get(1).ok_or(Skip::Malformed)?.as_str();
        let [start, end] = numbers(caps, [2, 3]).ok_or(Skip::Malformed)?;
        let (lo, hi) = (start.min(end), start.max(end));

        let mut out = Collector::new(self.bounds.max_members);
        for port in lo..=hi {
            out.push(format!("{}{}", prefix, port))?;
        }
        Ok(out.finish())
    }

    fn three_level(&self, caps: &Captures) -> Result<Vec<String>, Skip> {
        let prefix = caps.get(1).ok_or(Skip::Malformed)?.as_str();
        let [a, b, c, d, e, f] = numbers(caps, [2, 3, 4, 5, 6, 7]).ok_or(Skip::Malformed)?;
        let (start, end) = ordered((a, b, c), (d, e, f));
        let (start_slot, start_sub, start_port) = start;
        let (end_slot, end_sub, end_port) = end;

        let mut out = Collector::new(self.bounds.max_members);
        for slot in start_slot..=end_slot {
            let sub_lo = if slot == start_slot { start_sub } else { 0 };
            let sub_hi = if slot == end_slot { end_sub } else { self.bounds.max_subslot };
            for sub in sub_lo..=sub_hi {
                let port_lo = if slot == start_slot && sub == start_sub { start_port } else { 1 };
                let port_hi = if slot == end_slot && sub == end_sub {
                    end_port
                } else {
                    self.bounds.ports_per_subslot
                };
                for port in port_lo..=port_hi {
                    out.push(format!("{}{}/{}/{}", prefix, slot, sub, port))?;
                }
            }
        }
        Ok(out.finish())
    }

    fn two_level(&self, caps: &Captures) -> Result<Vec<String>, Skip> {
        let prefix = caps.get(1).ok_or(Skip::Malformed)?.as_str();
        let [a, b, c, d] = numbers(caps, [2, 3, 4, 5]).ok_or(Skip::Malformed)?;
        let ((start_slot, start_port), (end_slot, end_port)) = ordered((a, b), (c, d));

        let mut out = Collector::new(self.bounds.max_members);
        for slot in start_slot..=end_slot {
            let port_lo = if slot == start_slot { start_port } else { 1 };
            let port_hi = if slot == end_slot { end_port } else { self.bounds.ports_per_slot };
            for port in port_lo..=port_hi {
                out.push(format!("{}{}/{}", prefix, slot, port))?;
            }
        }
        Ok(out.finish())
    }

    fn path_to_number(&self, caps: &Captures) -> Result<Vec<String>, Skip> {
        let prefix = caps.get(1).ok_or(Skip::Malformed)?.as_str();
        let [slot, sub, start, end] = numbers(caps, [2, 3, 4, 5]).ok_or(Skip::Malformed)?;
        let (lo, hi) = (start.min(end), start.max(end));

        let mut out = Collector::new(self.bounds.max_members);
        for port in lo..=hi {
            out.push(format!("{}{}/{}/{}", prefix, slot, sub, port))?;
        }
        Ok(out.finish())
    }
}

/// Expand with the default density bounds
pub fn expand_ports(notation: &str) -> Vec<String> {
    PortExpander::default().expand(notation)
}

fn fragments(notation: &str) -> impl Iterator<Item = &str> {
    notation.split(',').map(str::trim).filter(|f| !f.is_empty())
}

/// Keeps the first occurrence of each identifier
#[derive(Default)]
struct UniquePorts {
    seen: HashSet<String>,
    ports: Vec<String>,
}

impl UniquePorts {
    fn extend(&mut self, expanded: impl IntoIterator<Item = String>) {
        for port in expanded {
            if self.seen.insert(port.clone()) {
                self.ports.push(port);
            }
        }
    }

    fn finish(self) -> Vec<String> {
        self.ports
    }
}

/// Parse the numeric capture groups; any overflow makes the whole match unusable
fn numbers<const N: usize>(caps: &Captures, groups: [usize; N]) -> Option<[u32; N]> {
    let mut values = [0u32; N];
    for (slot, group) in values.iter_mut().zip(groups) {
        *slot = caps.get(group)?.as_str().parse().ok()?;
    }
    Some(values)
}

fn ordered<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Accumulates expanded names and refuses to grow past the member limit
struct Collector {
    items: Vec<String>,
    limit: usize,
}

impl Collector {
    fn new(limit: usize) -> Self {
        Self {
            items: Vec::new(),
            limit,
        }
    }

    fn push(&mut self, item: String) -> Result<(), Skip> {
        if self.items.len() >= self.limit {
            return Err(Skip::TooLarge);
        }
        self.items.push(item);
        Ok(())
    }

    fn finish(self) -> Vec<String> {
        self.items
    }
}
