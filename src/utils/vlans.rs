use std::collections::BTreeSet;

pub const MIN_VLAN: u32 = 1;
pub const MAX_VLAN: u32 = 4094;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VlanListError {
    #[error("VLAN list is empty")]
    Empty,
    #[error("'{0}' is not a VLAN id or range, expected e.g. 10 or 10,20,30-40")]
    Invalid(String),
    #[error("VLAN {0} is outside 1-4094")]
    OutOfRange(u32),
    #[error("VLAN range {0}-{1} must start below its end")]
    Reversed(u32, u32),
}

/// VlanList is a sorted, duplicate-free set of VLAN ids parsed from
/// notation such as `10,20,30-40`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VlanList(Vec<u16>);

impl VlanList {
    pub fn parse(notation: &str) -> Result<Self, VlanListError> {
        let mut ids = BTreeSet::new();

        for part in notation.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match part.split_once('-') {
                Some((start, end)) => {
                    let start = parse_id(start, part)?;
                    let end = parse_id(end, part)?;
                    if start > end {
                        return Err(VlanListError::Reversed(start, end));
                    }
                    ids.extend(start..=end);
                }
                None => {
                    ids.insert(parse_id(part, part)?);
                }
            }
        }

        if ids.is_empty() {
            return Err(VlanListError::Empty);
        }
        Ok(Self(ids.into_iter().map(|id| id as u16).collect()))
    }

    pub fn ids(&self) -> &[u16] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consecutive ids collapsed into inclusive runs
    fn runs(&self) -> Vec<(u16, u16)> {
        let mut runs: Vec<(u16, u16)> = Vec::new();
        for &id in &self.0 {
            match runs.last_mut() {
                Some((_, end)) if *end + 1 == id => *end = id,
                _ => runs.push((id, id)),
            }
        }
        runs
    }

    /// `10,20,30-40`
    pub fn to_compact(&self) -> String {
        self.runs()
            .into_iter()
            .map(|(start, end)| {
                if start == end {
                    start.to_string()
                } else {
                    format!("{}-{}", start, end)
                }
            })
            .collect::<Vec<_>>()
            .join(",")
    }

    /// `10 20 30 to 40`
    pub fn to_range_phrase(&self) -> String {
        self.runs()
            .into_iter()
            .map(|(start, end)| {
                if start == end {
                    start.to_string()
                } else {
                    format!("{} to {}", start, end)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn parse_id(text: &str, part: &str) -> Result<u32, VlanListError> {
    let id: u32 = text
        .trim()
        .parse()
        .map_err(|_| VlanListError::Invalid(part.to_string()))?;
    if !(MIN_VLAN..=MAX_VLAN).contains(&id) {
        return Err(VlanListError::OutOfRange(id));
    }
    Ok(id)
}

/// True when the notation names more than one VLAN (`10,20` or `10-20`)
pub fn is_batch_notation(notation: &str) -> bool {
    notation.contains(',') || notation.contains('-')
}
