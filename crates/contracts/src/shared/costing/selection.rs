use std::collections::BTreeSet;

/// Keys of the line items included in a category total.
///
/// `toggle_all` remembers the selection it replaced so that two consecutive
/// header clicks restore what the user had before. The snapshot is used once:
/// after a restore the next "select all" arms nothing, and the click after it
/// clears. Any other mutation drops the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    keys: BTreeSet<String>,
    before_select_all: Option<BTreeSet<String>>,
    /// Set by a restore, cleared by any manual change
    snapshot_spent: bool,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            before_select_all: None,
            snapshot_spent: false,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.keys.iter().cloned().collect()
    }

    /// Flips membership of `key`
    pub fn toggle_one(&mut self, key: &str) {
        self.forget_snapshot();
        if !self.keys.remove(key) {
            self.keys.insert(key.to_string());
        }
    }

    /// Explicit include/exclude, as reported by a checkbox change event
    pub fn set(&mut self, key: &str, included: bool) {
        self.forget_snapshot();
        if included {
            self.keys.insert(key.to_string());
        } else {
            self.keys.remove(key);
        }
    }

    /// True when the selection is exactly `candidates`
    pub fn is_all_selected<S: AsRef<str>>(&self, candidates: &[S]) -> bool {
        let candidates: BTreeSet<&str> = candidates.iter().map(AsRef::as_ref).collect();
        candidates.len() == self.keys.len()
            && self.keys.iter().all(|k| candidates.contains(k.as_str()))
    }

    /// "Select all" relative to the visible (possibly filtered) candidate list.
    ///
    /// If the selection already equals `candidates` it is cleared (or, right
    /// after a "select all" over a partial selection, that partial selection
    /// comes back once). Otherwise it becomes exactly `candidates`.
    pub fn toggle_all<S: AsRef<str>>(&mut self, candidates: &[S]) {
        if self.is_all_selected(candidates) {
            match self.before_select_all.take() {
                Some(previous) if previous != self.keys => {
                    self.keys = previous;
                    self.snapshot_spent = true;
                }
                _ => self.keys.clear(),
            }
        } else {
            let previous = std::mem::replace(
                &mut self.keys,
                candidates.iter().map(|k| k.as_ref().to_string()).collect(),
            );
            if !self.snapshot_spent {
                self.before_select_all = Some(previous);
            }
        }
    }

    fn forget_snapshot(&mut self) {
        self.before_select_all = None;
        self.snapshot_spent = false;
    }

    /// Initializes the selection for a freshly loaded dataset.
    ///
    /// A non-empty preselection wins (restricted to keys present in the
    /// dataset), otherwise every dataset key is selected.
    pub fn seed<S: AsRef<str>, P: AsRef<str>>(&mut self, dataset_keys: &[S], preselection: &[P]) {
        let dataset: BTreeSet<&str> = dataset_keys.iter().map(AsRef::as_ref).collect();
        self.forget_snapshot();
        self.keys = if preselection.is_empty() {
            dataset.iter().map(|k| k.to_string()).collect()
        } else {
            preselection
                .iter()
                .map(AsRef::as_ref)
                .filter(|k| dataset.contains(k))
                .map(str::to_string)
                .collect()
        };
    }

    /// Drops keys that are no longer part of the dataset
    pub fn retain_keys<S: AsRef<str>>(&mut self, dataset_keys: &[S]) {
        let dataset: BTreeSet<&str> = dataset_keys.iter().map(AsRef::as_ref).collect();
        self.keys.retain(|k| dataset.contains(k.as_str()));
        self.forget_snapshot();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_toggle_one_flips_membership() {
        let mut sel = SelectionSet::new();
        sel.toggle_one("OP1");
        assert!(sel.contains("OP1"));
        sel.toggle_one("OP1");
        assert!(!sel.contains("OP1"));
    }

    #[test]
    fn test_toggle_all_clears_when_everything_selected() {
        let all = keys(&["a", "b", "c"]);
        let mut sel = SelectionSet::from_keys(all.clone());
        sel.toggle_all(&all);
        assert!(sel.is_empty());
        sel.toggle_all(&all);
        assert_eq!(sel.to_vec(), all);
    }

    #[test]
    fn test_toggle_all_twice_restores_partial_selection() {
        let all = keys(&["a", "b", "c"]);
        let mut sel = SelectionSet::from_keys(["b"]);
        let original = sel.to_vec();

        sel.toggle_all(&all);
        assert_eq!(sel.to_vec(), all);
        sel.toggle_all(&all);
        assert_eq!(sel.to_vec(), original);
    }

    #[test]
    fn test_header_clicks_after_restore_reach_empty() {
        let all = keys(&["a", "b", "c"]);
        let mut sel = SelectionSet::from_keys(["b"]);
        let mut seen = Vec::new();
        for _ in 0..6 {
            sel.toggle_all(&all);
            seen.push(sel.to_vec());
        }
        assert_eq!(
            seen,
            vec![
                all.clone(),
                keys(&["b"]),
                all.clone(),
                Vec::new(),
                all.clone(),
                Vec::new(),
            ]
        );
    }

    #[test]
    fn test_manual_change_rearms_restore() {
        let all = keys(&["a", "b", "c"]);
        let mut sel = SelectionSet::from_keys(["b"]);
        sel.toggle_all(&all);
        sel.toggle_all(&all);
        // back to ["b"], the user edits by hand
        sel.toggle_one("c");
        sel.toggle_all(&all);
        sel.toggle_all(&all);
        assert_eq!(sel.to_vec(), keys(&["b", "c"]));
    }

    #[test]
    fn test_toggle_all_from_empty_round_trips() {
        let all = keys(&["a", "b"]);
        let mut sel = SelectionSet::new();
        sel.toggle_all(&all);
        sel.toggle_all(&all);
        assert!(sel.is_empty());
    }

    #[test]
    fn test_toggle_all_acts_on_filtered_candidates_only() {
        let mut sel = SelectionSet::from_keys(["a", "b", "c", "d"]);
        let filtered = keys(&["b", "c"]);

        sel.toggle_all(&filtered);
        assert_eq!(sel.to_vec(), filtered);
        assert!(sel.is_all_selected(&filtered));
    }

    #[test]
    fn test_manual_change_after_select_all_clears_on_next_toggle() {
        let all = keys(&["a", "b"]);
        let mut sel = SelectionSet::from_keys(["a"]);
        sel.toggle_all(&all);
        sel.toggle_one("b");
        sel.toggle_one("b");
        sel.toggle_all(&all);
        assert!(sel.is_empty());
    }

    #[test]
    fn test_seed_defaults_to_all_dataset_keys() {
        let mut sel = SelectionSet::from_keys(["old"]);
        sel.seed(&keys(&["x", "y"]), &Vec::<String>::new());
        assert_eq!(sel.to_vec(), keys(&["x", "y"]));
    }

    #[test]
    fn test_seed_uses_preselection_present_in_dataset() {
        let mut sel = SelectionSet::new();
        sel.seed(&keys(&["x", "y", "z"]), &keys(&["y", "missing"]));
        assert_eq!(sel.to_vec(), keys(&["y"]));
    }

    #[test]
    fn test_retain_keys_drops_stale_entries() {
        let mut sel = SelectionSet::from_keys(["a", "b"]);
        sel.retain_keys(&keys(&["b", "c"]));
        assert_eq!(sel.to_vec(), keys(&["b"]));
    }
}
