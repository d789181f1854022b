use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDate};

use super::dto::{MonthlyPricePoint, PriceHistorySeries, PriceRecordDto};

/// Outcome of a lookup whose requests both succeeded
#[derive(Debug, Clone, PartialEq)]
pub enum PriceLookupOutcome {
    Found(PriceHistorySeries),
    /// Both series came back empty
    NotFound,
}

/// Lifecycle of one price history search
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LookupState {
    #[default]
    Idle,
    Searching { codigo: String },
    Found(PriceHistorySeries),
    Empty { codigo: String },
    Failed { codigo: String, message: String },
}

impl LookupState {
    pub fn start(codigo: &str) -> Self {
        LookupState::Searching {
            codigo: codigo.trim().to_string(),
        }
    }

    pub fn resolve(codigo: &str, outcome: PriceLookupOutcome) -> Self {
        match outcome {
            PriceLookupOutcome::Found(series) => LookupState::Found(series),
            PriceLookupOutcome::NotFound => LookupState::Empty {
                codigo: codigo.to_string(),
            },
        }
    }

    pub fn fail(codigo: &str, message: impl Into<String>) -> Self {
        LookupState::Failed {
            codigo: codigo.to_string(),
            message: message.into(),
        }
    }

    pub fn is_searching(&self) -> bool {
        matches!(self, LookupState::Searching { .. })
    }
}

/// Calendar month ("YYYY-MM") of a record date
pub fn month_key(fecha: &str) -> Option<String> {
    let fecha = fecha.trim();
    let date = fecha
        .get(..10)
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .or_else(|| DateTime::parse_from_rfc3339(fecha).ok().map(|dt| dt.date_naive()))
        .or_else(|| NaiveDate::parse_from_str(fecha, "%d/%m/%Y").ok())?;
    Some(date.format("%Y-%m").to_string())
}

/// Groups by month, averages within each month, sorts ascending.
/// Records with an unreadable date or a non-finite price are skipped.
pub fn monthly_averages(records: &[PriceRecordDto]) -> Vec<MonthlyPricePoint> {
    let mut buckets: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for record in records {
        if !record.precio.is_finite() {
            continue;
        }
        let Some(month) = month_key(&record.fecha) else {
            continue;
        };
        let bucket = buckets.entry(month).or_insert((0.0, 0));
        bucket.0 += record.precio;
        bucket.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(month, (sum, samples))| MonthlyPricePoint {
            month,
            average: sum / samples as f64,
            samples,
        })
        .collect()
}

/// Aligns both monthly series; `NotFound` when neither has any point
pub fn build_history(
    codigo: &str,
    almacen: &[PriceRecordDto],
    orden_compra: &[PriceRecordDto],
) -> PriceLookupOutcome {
    let almacen = monthly_averages(almacen);
    let orden_compra = monthly_averages(orden_compra);
    if almacen.is_empty() && orden_compra.is_empty() {
        return PriceLookupOutcome::NotFound;
    }

    let months: Vec<String> = almacen
        .iter()
        .chain(orden_compra.iter())
        .map(|p| p.month.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let align = |points: &[MonthlyPricePoint]| -> Vec<Option<f64>> {
        let by_month: BTreeMap<&str, f64> =
            points.iter().map(|p| (p.month.as_str(), p.average)).collect();
        months
            .iter()
            .map(|m| by_month.get(m.as_str()).copied())
            .collect()
    };

    PriceLookupOutcome::Found(PriceHistorySeries {
        codigo: codigo.to_string(),
        almacen: align(&almacen),
        orden_compra: align(&orden_compra),
        months,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(fecha: &str, precio: f64) -> PriceRecordDto {
        PriceRecordDto {
            fecha: fecha.to_string(),
            precio,
            moneda: Some("USD".to_string()),
        }
    }

    #[test]
    fn test_month_key_formats() {
        assert_eq!(month_key("2024-03-15").as_deref(), Some("2024-03"));
        assert_eq!(month_key("2024-03-15T10:00:00Z").as_deref(), Some("2024-03"));
        assert_eq!(month_key("15/03/2024").as_deref(), Some("2024-03"));
        assert_eq!(month_key("marzo"), None);
    }

    #[test]
    fn test_five_records_in_three_months() {
        let almacen = vec![
            rec("2024-05-10", 6.0),
            rec("2024-03-01", 4.0),
            rec("2024-03-20", 6.0),
            rec("2024-04-02", 5.0),
            rec("2024-05-28", 8.0),
        ];

        let outcome = build_history("TELA-01", &almacen, &[]);
        let PriceLookupOutcome::Found(series) = outcome else {
            panic!("expected data");
        };

        assert_eq!(series.months, vec!["2024-03", "2024-04", "2024-05"]);
        assert_eq!(series.almacen, vec![Some(5.0), Some(5.0), Some(7.0)]);
        assert_eq!(series.orden_compra, vec![None, None, None]);
        assert_eq!(series.value_bounds(), Some((5.0, 7.0)));
    }

    #[test]
    fn test_series_aligned_on_union_of_months() {
        let almacen = vec![rec("2024-01-05", 2.0)];
        let oc = vec![rec("2024-02-05", 3.0), rec("2024-02-25", 5.0)];

        let PriceLookupOutcome::Found(series) = build_history("X", &almacen, &oc) else {
            panic!("expected data");
        };
        assert_eq!(series.months, vec!["2024-01", "2024-02"]);
        assert_eq!(series.almacen, vec![Some(2.0), None]);
        assert_eq!(series.orden_compra, vec![None, Some(4.0)]);
    }

    #[test]
    fn test_both_empty_is_not_found() {
        assert_eq!(build_history("X", &[], &[]), PriceLookupOutcome::NotFound);
        // unreadable dates only
        assert_eq!(
            build_history("X", &[rec("sin fecha", 1.0)], &[]),
            PriceLookupOutcome::NotFound
        );
    }

    #[test]
    fn test_lookup_state_transitions() {
        let state = LookupState::start(" AV-9 ");
        assert!(state.is_searching());
        assert_eq!(state, LookupState::Searching { codigo: "AV-9".into() });

        let empty = LookupState::resolve("AV-9", PriceLookupOutcome::NotFound);
        assert_eq!(empty, LookupState::Empty { codigo: "AV-9".into() });

        let failed = LookupState::fail("AV-9", "HTTP 502");
        assert!(matches!(failed, LookupState::Failed { .. }));
        assert_ne!(failed, empty);
    }
}
