//! Accumulation interval filter.
//!
//! Some producers write the same accumulated parameter over several interval
//! lengths (e.g., 3h and 12h precipitation). An [`IntervalFilter`] names the
//! authoritative interval per parameter id; records of that parameter with
//! any other interval are dropped before indexing. Parameters without a rule
//! are always kept.

use tracing::{debug, warn};

/// Pack a `discipline-category-number` triple.
pub fn pack_discipline_id(discipline: i32, category: i32, number: i32) -> i32 {
    (discipline << 16)
        .wrapping_add(category << 8)
        .wrapping_add(number)
}

/// Pack a `center-subcenter-version-param` quadruple.
pub fn pack_center_id(center: i32, subcenter: i32, version: i32, param: i32) -> i32 {
    (center << 8)
        .wrapping_add(subcenter << 16)
        .wrapping_add(version << 24)
        .wrapping_add(param)
}

/// Parse a dash separated id string into its packed form.
///
/// Three segments are packed with [`pack_discipline_id`], four with
/// [`pack_center_id`]. Trailing empty segments (`"0-1-8-"`) are ignored.
/// Any other shape, or a segment that is not a bare integer, gives `None`.
pub fn parse_packed_id(id: &str) -> Option<i32> {
    let mut segments: Vec<&str> = id.split('-').collect();
    while segments.last() == Some(&"") {
        segments.pop();
    }
    let parts = segments
        .into_iter()
        .map(str::parse::<i32>)
        .collect::<Result<Vec<_>, _>>()
        .ok()?;
    match parts.as_slice() {
        [discipline, category, number] => Some(pack_discipline_id(*discipline, *category, *number)),
        [center, subcenter, version, param] => {
            Some(pack_center_id(*center, *subcenter, *version, *param))
        }
        _ => None,
    }
}

/// One configured rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalRule {
    /// Packed parameter id
    pub id: i32,
    /// Interval length to keep
    pub interval_length: i32,
    /// Probability constraint, if any
    pub probability: Option<i32>,
}

impl IntervalRule {
    fn applies_to(&self, id: i32, probability: Option<i32>) -> bool {
        self.id == id
            && match self.probability {
                None => true,
                Some(p) => probability == Some(p),
            }
    }
}

/// Ordered exclusion rules keyed by parameter id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntervalFilter {
    rules: Vec<IntervalRule>,
    exclude_zero: bool,
}

impl IntervalFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule keeping only `interval_length` for the parameter `id`.
    ///
    /// A malformed `id` or `prob` is logged and the rule is dropped.
    pub fn add_variable(&mut self, interval_length: i32, id: &str, prob: Option<&str>) {
        let Some(packed) = parse_packed_id(id) else {
            warn!(id, "Dropping interval filter rule with malformed id");
            return;
        };
        let probability = match prob.map(str::parse::<i32>) {
            None => None,
            Some(Ok(p)) => Some(p),
            Some(Err(e)) => {
                warn!(id, prob, error = %e, "Dropping interval filter rule with malformed probability");
                return;
            }
        };
        debug!(id, packed, interval_length, ?probability, "Added interval filter rule");
        self.rules.push(IntervalRule {
            id: packed,
            interval_length,
            probability,
        });
    }

    /// Reject zero-length intervals regardless of the rules.
    pub fn set_exclude_zero(&mut self, exclude_zero: bool) {
        self.exclude_zero = exclude_zero;
    }

    pub fn exclude_zero(&self) -> bool {
        self.exclude_zero
    }

    pub fn rules(&self) -> &[IntervalRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Decide whether a record is kept.
    ///
    /// The first rule matching the id and probability decides; records no
    /// rule applies to are kept.
    pub fn filter_ok(&self, id: i32, has_length: i32, prob: Option<i32>) -> bool {
        if has_length == 0 && self.exclude_zero {
            return false;
        }
        match self.rules.iter().find(|r| r.applies_to(id, prob)) {
            Some(rule) => rule.interval_length == has_length,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_shifts() {
        assert_eq!(pack_discipline_id(0, 1, 8), (1 << 8) + 8);
        assert_eq!(pack_discipline_id(2, 0, 0), 2 << 16);
        assert_eq!(pack_center_id(7, 0, 2, 61), (7 << 8) + (2 << 24) + 61);
        assert_eq!(pack_center_id(0, 1, 0, 0), 1 << 16);
    }

    #[test]
    fn test_parse_packed_id() {
        assert_eq!(parse_packed_id("0-1-8"), Some(pack_discipline_id(0, 1, 8)));
        assert_eq!(parse_packed_id("7-0-2-61"), Some(pack_center_id(7, 0, 2, 61)));
        assert_eq!(parse_packed_id("0-1"), None);
        assert_eq!(parse_packed_id("0-1-8-9-10"), None);
        assert_eq!(parse_packed_id("0-x-8"), None);
        assert_eq!(parse_packed_id(""), None);
    }

    #[test]
    fn test_high_version_wraps() {
        // version 255 sets the sign bit
        assert!(pack_center_id(0, 0, 255, 0) < 0);
    }

    #[test]
    fn test_malformed_rules_are_dropped() {
        let mut filter = IntervalFilter::new();
        filter.add_variable(12, "0-1", None);
        filter.add_variable(12, "a-b-c", None);
        filter.add_variable(12, "0-1-8", Some("fifty"));
        assert!(filter.is_empty());
    }

    #[test]
    fn test_first_match_wins() {
        let mut filter = IntervalFilter::new();
        filter.add_variable(3, "0-1-8", None);
        filter.add_variable(12, "0-1-8", None);
        let id = pack_discipline_id(0, 1, 8);

        assert!(filter.filter_ok(id, 3, None));
        assert!(!filter.filter_ok(id, 12, None));
    }
}
