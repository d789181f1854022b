/// A costed line item supplied by the quoting backend.
///
/// Base costs are read-only; only the adjustment state kept in ledgers is
/// mutable on the client.
pub trait CostLine {
    /// Unique key inside its category
    fn key(&self) -> String;

    /// Cost of one unit (or one kg) of the material
    fn base_unit_cost(&self) -> f64;

    /// Units (or kg) consumed per garment
    fn quantity_per_garment(&self) -> f64;

    /// Per-garment cost as reported by the backend
    fn base_cost_per_garment(&self) -> f64 {
        self.base_unit_cost() * self.quantity_per_garment()
    }

    /// Text matched by the search box of the breakdown tables
    fn search_text(&self) -> String {
        self.key()
    }

    /// Case-insensitive substring match against `search_text`
    fn matches_query(&self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return true;
        }
        self.search_text()
            .to_lowercase()
            .contains(&query.to_lowercase())
    }
}

/// Keys of all items
pub fn keys_of<T: CostLine>(items: &[T]) -> Vec<String> {
    items.iter().map(CostLine::key).collect()
}

/// Keys of the items visible under the current search text
pub fn filtered_keys<T: CostLine>(items: &[T], query: &str) -> Vec<String> {
    items
        .iter()
        .filter(|item| item.matches_query(query))
        .map(CostLine::key)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item(&'static str, f64, f64);

    impl CostLine for Item {
        fn key(&self) -> String {
            self.0.to_string()
        }

        fn base_unit_cost(&self) -> f64 {
            self.1
        }

        fn quantity_per_garment(&self) -> f64 {
            self.2
        }
    }

    #[test]
    fn test_filtered_keys_keep_dataset_order() {
        let items = [Item("BOTON-12", 0.1, 6.0), Item("CIERRE", 0.5, 1.0), Item("boton-18", 0.2, 4.0)];
        assert_eq!(filtered_keys(&items, " Boton "), vec!["BOTON-12", "boton-18"]);
        assert_eq!(filtered_keys(&items, "").len(), 3);
        assert_eq!(keys_of(&items), vec!["BOTON-12", "CIERRE", "boton-18"]);
    }

    #[test]
    fn test_default_per_garment_cost() {
        assert!((Item("X", 0.25, 4.0).base_cost_per_garment() - 1.0).abs() < 1e-12);
    }
}
