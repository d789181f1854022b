use std::collections::{BTreeMap, HashMap};

/// Closed numeric range accepted by an editable input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Per-item factor for WIPs, hilos, avíos and telas
    pub const ITEM_FACTOR: ValueRange = ValueRange { min: 0.1, max: 10.0 };
    /// Margin / brand / effort factors of the price panel
    pub const PRICE_FACTOR: ValueRange = ValueRange { min: 0.1, max: 3.0 };
    /// Directly entered per-garment cost (detailed mode)
    pub const DETAILED_COST: ValueRange = ValueRange { min: 0.0, max: 1_000_000.0 };
    /// Lump sum for a whole category (fixed-amount mode)
    pub const FIXED_AMOUNT: ValueRange = ValueRange { min: 0.0, max: 1_000_000_000.0 };

    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }

    /// Parses user text; `None` when unparseable or out of range.
    ///
    /// A single decimal comma is accepted ("1,5").
    pub fn parse(&self, raw: &str) -> Option<f64> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }
        let normalized;
        let text = if text.matches(',').count() == 1 && !text.contains('.') {
            normalized = text.replace(',', ".");
            normalized.as_str()
        } else {
            text
        };
        text.parse::<f64>().ok().filter(|v| self.contains(*v))
    }
}

/// When a valid typed value becomes the committed one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitPolicy {
    /// On every keystroke
    #[default]
    Live,
    /// Only when the input loses focus (WIP factors)
    OnBlur,
}

/// Result of recording a keystroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputOutcome {
    /// Valid and now the committed value
    Committed(f64),
    /// Valid, waiting for blur to be committed
    Pending(f64),
    /// Empty text on an input without a default: the entry was cleared
    Cleared,
    /// Unparseable or out of range, committed value untouched
    Rejected,
}

impl InputOutcome {
    pub fn is_valid(&self) -> bool {
        !matches!(self, InputOutcome::Rejected)
    }
}

/// Typed text and committed number of one input, kept side by side so that
/// intermediate states like "1." or "" never reach the numbers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditableValue {
    pub display_text: String,
    pub committed: Option<f64>,
}

impl EditableValue {
    pub fn with_value(value: f64) -> Self {
        Self {
            display_text: format_value(value),
            committed: Some(value),
        }
    }

    pub fn value_or(&self, fallback: f64) -> f64 {
        self.committed.unwrap_or(fallback)
    }

    /// Records `raw` verbatim and commits it when the policy and range allow.
    ///
    /// `clearable` inputs treat empty text as "no entered value".
    pub fn set_text(
        &mut self,
        raw: &str,
        range: ValueRange,
        policy: CommitPolicy,
        clearable: bool,
    ) -> InputOutcome {
        self.display_text = raw.to_string();

        if clearable && raw.trim().is_empty() {
            if policy == CommitPolicy::Live {
                self.committed = None;
            }
            return InputOutcome::Cleared;
        }

        match range.parse(raw) {
            Some(value) => match policy {
                CommitPolicy::Live => {
                    self.committed = Some(value);
                    InputOutcome::Committed(value)
                }
                CommitPolicy::OnBlur => InputOutcome::Pending(value),
            },
            None => InputOutcome::Rejected,
        }
    }

    /// Focus lost: commits pending valid text, otherwise snaps the text back
    /// to the committed value (or `fallback`). Returns the committed value.
    pub fn blur(&mut self, range: ValueRange, fallback: Option<f64>, clearable: bool) -> Option<f64> {
        if clearable && self.display_text.trim().is_empty() {
            self.committed = None;
            return None;
        }

        match range.parse(&self.display_text) {
            Some(value) => {
                self.committed = Some(value);
            }
            None => {
                let restored = self.committed.or(fallback);
                self.committed = restored;
                self.display_text = restored.map(format_value).unwrap_or_default();
            }
        }
        self.committed
    }

    pub fn is_text_valid(&self, range: ValueRange, clearable: bool) -> bool {
        (clearable && self.display_text.trim().is_empty()) || range.parse(&self.display_text).is_some()
    }
}

/// Keyed collection of editable values (factor or detailed-cost ledger).
///
/// With a default (factor ledgers) every seeded key always resolves to a
/// number; without one (detailed costs) a missing entry means "not entered".
#[derive(Debug, Clone, PartialEq)]
pub struct ValueLedger {
    range: ValueRange,
    policy: CommitPolicy,
    default: Option<f64>,
    entries: HashMap<String, EditableValue>,
}

impl ValueLedger {
    /// Factor ledger, every key defaults to 1.0
    pub fn factors(range: ValueRange) -> Self {
        Self {
            range,
            policy: CommitPolicy::Live,
            default: Some(1.0),
            entries: HashMap::new(),
        }
    }

    /// Ledger of optional entries (missing key = no value entered)
    pub fn optional(range: ValueRange) -> Self {
        Self {
            range,
            policy: CommitPolicy::Live,
            default: None,
            entries: HashMap::new(),
        }
    }

    pub fn with_policy(mut self, policy: CommitPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn range(&self) -> ValueRange {
        self.range
    }

    pub fn policy(&self) -> CommitPolicy {
        self.policy
    }

    fn clearable(&self) -> bool {
        self.default.is_none()
    }

    /// Aligns the ledger with a freshly loaded dataset: new keys get the
    /// default, keys that left the dataset are dropped, the rest are kept.
    pub fn seed<S: AsRef<str>>(&mut self, keys: &[S]) {
        let mut next = HashMap::with_capacity(keys.len());
        for key in keys {
            let key = key.as_ref();
            let entry = match self.entries.remove(key) {
                Some(existing) => existing,
                None => match self.default {
                    Some(default) => EditableValue::with_value(default),
                    None => continue,
                },
            };
            next.insert(key.to_string(), entry);
        }
        self.entries = next;
    }

    /// Resets every key of the dataset to the default
    pub fn reset<S: AsRef<str>>(&mut self, keys: &[S]) {
        self.entries.clear();
        self.seed(keys);
    }

    /// Committed value, or the default when nothing was committed
    pub fn value(&self, key: &str) -> Option<f64> {
        self.entries
            .get(key)
            .and_then(|e| e.committed)
            .or(self.default)
    }

    /// Committed factor, 1.0 when unknown
    pub fn factor(&self, key: &str) -> f64 {
        self.value(key).unwrap_or(1.0)
    }

    pub fn display_text(&self, key: &str) -> String {
        match self.entries.get(key) {
            Some(entry) => entry.display_text.clone(),
            None => self.default.map(format_value).unwrap_or_default(),
        }
    }

    pub fn is_text_valid(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .map(|e| e.is_text_valid(self.range, self.clearable()))
            .unwrap_or(true)
    }

    pub fn set_text(&mut self, key: &str, raw: &str) -> InputOutcome {
        let (range, policy, clearable, default) =
            (self.range, self.policy, self.clearable(), self.default);
        let entry = self.entries.entry(key.to_string()).or_insert_with(|| EditableValue {
            display_text: String::new(),
            committed: default,
        });
        entry.set_text(raw, range, policy, clearable)
    }

    /// Focus lost on `key`; returns the value to report to a parent listener
    pub fn blur(&mut self, key: &str) -> Option<f64> {
        let (range, clearable, default) = (self.range, self.clearable(), self.default);
        let entry = self.entries.get_mut(key)?;
        entry.blur(range, default, clearable)
    }

    /// Programmatic update (e.g. mirrored from an external owner).
    /// Out-of-range values are ignored.
    pub fn set_value(&mut self, key: &str, value: f64) -> bool {
        if !self.range.contains(value) {
            return false;
        }
        self.entries
            .insert(key.to_string(), EditableValue::with_value(value));
        true
    }

    /// Follows a map owned elsewhere: every key of the ledger takes the
    /// owner's value, or the default when the owner has none. Entries that
    /// already agree are left alone so pending text is not overwritten.
    pub fn mirror(&mut self, owner_values: &BTreeMap<String, f64>) {
        let keys: Vec<String> = self.entries.keys().cloned().collect();
        for key in keys {
            let target = owner_values.get(&key).copied().or(self.default);
            if self.entries.get(&key).and_then(|e| e.committed) == target {
                continue;
            }
            match target {
                Some(value) => {
                    self.set_value(&key, value);
                }
                None => self.clear(&key),
            }
        }
    }

    /// Removes the entry (back to default / "not entered")
    pub fn clear(&mut self, key: &str) {
        self.entries.remove(key);
    }

    /// Drops every entry; the next `seed` starts from defaults
    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    /// Committed values of all entries, ordered by key
    pub fn committed_values(&self) -> BTreeMap<String, f64> {
        self.entries
            .iter()
            .filter_map(|(k, e)| e.committed.map(|v| (k.clone(), v)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Shortest textual form of a committed value ("1", "1.25")
pub fn format_value(value: f64) -> String {
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factor_ledger(keys: &[&str]) -> ValueLedger {
        let mut ledger = ValueLedger::factors(ValueRange::ITEM_FACTOR);
        ledger.seed(keys);
        ledger
    }

    #[test]
    fn test_seed_defaults_every_key_to_one() {
        let ledger = factor_ledger(&["a", "b"]);
        assert_eq!(ledger.value("a"), Some(1.0));
        assert_eq!(ledger.display_text("b"), "1");
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_reseed_keeps_existing_and_drops_missing() {
        let mut ledger = factor_ledger(&["a", "b"]);
        ledger.set_text("a", "2.5");
        ledger.seed(&["a", "c"]);
        assert_eq!(ledger.factor("a"), 2.5);
        assert_eq!(ledger.factor("c"), 1.0);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_live_commit_updates_immediately() {
        let mut ledger = factor_ledger(&["a"]);
        assert_eq!(ledger.set_text("a", "1.5"), InputOutcome::Committed(1.5));
        assert_eq!(ledger.factor("a"), 1.5);
    }

    #[test]
    fn test_unparseable_text_keeps_committed_value() {
        let mut ledger = factor_ledger(&["a"]);
        ledger.set_text("a", "2");
        assert_eq!(ledger.set_text("a", "abc"), InputOutcome::Rejected);
        assert_eq!(ledger.factor("a"), 2.0);
        assert_eq!(ledger.display_text("a"), "abc");
        assert!(!ledger.is_text_valid("a"));
    }

    #[test]
    fn test_out_of_range_is_rejected_not_clamped() {
        let mut ledger = factor_ledger(&["a"]);
        assert_eq!(ledger.set_text("a", "0.05"), InputOutcome::Rejected);
        assert_eq!(ledger.factor("a"), 1.0);
        assert_eq!(ledger.set_text("a", "10.5"), InputOutcome::Rejected);
        assert_eq!(ledger.factor("a"), 1.0);
    }

    #[test]
    fn test_blur_snaps_invalid_text_back_to_committed() {
        let mut ledger = factor_ledger(&["a"]);
        ledger.set_text("a", "1.2");
        ledger.set_text("a", "0.05");
        assert_eq!(ledger.blur("a"), Some(1.2));
        assert_eq!(ledger.display_text("a"), "1.2");
    }

    #[test]
    fn test_intermediate_text_does_not_corrupt_value() {
        let mut ledger = factor_ledger(&["a"]);
        ledger.set_text("a", "");
        ledger.set_text("a", "1.");
        assert_eq!(ledger.display_text("a"), "1.");
        ledger.set_text("a", "1.7");
        assert_eq!(ledger.factor("a"), 1.7);
    }

    #[test]
    fn test_on_blur_policy_commits_only_on_blur() {
        let mut ledger = ValueLedger::factors(ValueRange::ITEM_FACTOR).with_policy(CommitPolicy::OnBlur);
        ledger.seed(&["wip-10"]);

        assert_eq!(ledger.set_text("wip-10", "1.3"), InputOutcome::Pending(1.3));
        assert_eq!(ledger.factor("wip-10"), 1.0);
        assert!(ledger.is_text_valid("wip-10"));

        assert_eq!(ledger.blur("wip-10"), Some(1.3));
        assert_eq!(ledger.factor("wip-10"), 1.3);
    }

    #[test]
    fn test_on_blur_policy_reverts_invalid_text() {
        let mut ledger = ValueLedger::factors(ValueRange::ITEM_FACTOR).with_policy(CommitPolicy::OnBlur);
        ledger.seed(&["wip-10"]);
        ledger.set_text("wip-10", "x");
        assert_eq!(ledger.blur("wip-10"), Some(1.0));
        assert_eq!(ledger.display_text("wip-10"), "1");
    }

    #[test]
    fn test_optional_ledger_clears_on_empty_text() {
        let mut ledger = ValueLedger::optional(ValueRange::DETAILED_COST);
        assert_eq!(ledger.value("av1"), None);
        ledger.set_text("av1", "0.35");
        assert_eq!(ledger.value("av1"), Some(0.35));
        assert_eq!(ledger.set_text("av1", "  "), InputOutcome::Cleared);
        assert_eq!(ledger.value("av1"), None);
    }

    #[test]
    fn test_decimal_comma_is_accepted() {
        assert_eq!(ValueRange::ITEM_FACTOR.parse("1,5"), Some(1.5));
        assert_eq!(ValueRange::ITEM_FACTOR.parse("1,5.0"), None);
    }

    #[test]
    fn test_price_factor_range() {
        assert!(ValueRange::PRICE_FACTOR.parse("3").is_some());
        assert!(ValueRange::PRICE_FACTOR.parse("3.01").is_none());
        assert!(ValueRange::PRICE_FACTOR.parse("NaN").is_none());
    }

    #[test]
    fn test_set_value_ignores_out_of_range() {
        let mut ledger = factor_ledger(&["a"]);
        assert!(!ledger.set_value("a", 20.0));
        assert!(ledger.set_value("a", 2.0));
        assert_eq!(ledger.committed_values().get("a"), Some(&2.0));
    }

    #[test]
    fn test_mirror_follows_owner_and_resets_missing_keys() {
        let mut ledger = factor_ledger(&["a", "b", "c"]).with_policy(CommitPolicy::OnBlur);
        ledger.set_text("b", "2");
        ledger.blur("b");

        let owner: BTreeMap<String, f64> = [("a".to_string(), 1.5)].into_iter().collect();
        ledger.mirror(&owner);

        assert_eq!(ledger.factor("a"), 1.5);
        assert_eq!(ledger.display_text("a"), "1.5");
        // b is not in the owner's map any more
        assert_eq!(ledger.factor("b"), 1.0);
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn test_mirror_keeps_pending_text_when_values_agree() {
        let mut ledger = factor_ledger(&["a"]).with_policy(CommitPolicy::OnBlur);
        ledger.set_text("a", "2.");
        ledger.mirror(&BTreeMap::new());
        assert_eq!(ledger.display_text("a"), "2.");
    }
}
