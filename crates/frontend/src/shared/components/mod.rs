pub mod ledger_cells;
pub mod load_state_view;
pub mod material_breakdown;
pub mod mode_select;
pub mod table;
pub mod table_checkbox;
pub mod value_input;

pub use ledger_cells::{DetailedCostCell, FactorCell, FixedAmountInput};
pub use load_state_view::LoadStateView;
pub use mode_select::CostingModeSelect;
pub use table_checkbox::{HeaderCheckbox, TableCheckbox};
pub use value_input::ValueInput;
