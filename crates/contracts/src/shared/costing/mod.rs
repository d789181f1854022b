//! Client-side cost aggregation for a quotation session
//!
//! Everything in here is pure: the UI owns the state and calls into these
//! types on every user event, totals are recomputed from scratch each time.

pub mod ledger;
pub mod line;
pub mod mode;
pub mod quotation;
pub mod scope;
pub mod selection;
pub mod totals;

pub use ledger::{CommitPolicy, EditableValue, InputOutcome, ValueLedger, ValueRange};
pub use line::CostLine;
pub use mode::{CostingMode, MaterialCosting};
pub use quotation::{CategoryTotals, PriceFactors, QuotationBreakdown};
pub use scope::StyleScope;
pub use selection::SelectionSet;
pub use totals::WipTotals;
