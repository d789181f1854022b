//! Ячейки таблиц, редактирующие ledger'ы костинга

use contracts::shared::costing::{MaterialCosting, ValueLedger, ValueRange};
use leptos::prelude::*;

use super::value_input::{range_hint, ValueInput};

/// Фактор строки (`<td>` с полем ввода).
///
/// `on_commit` получает только зафиксированное значение, на blur.
#[component]
pub fn FactorCell(
    factors: RwSignal<ValueLedger>,
    item_key: String,
    #[prop(default = None)]
    on_commit: Option<Callback<(String, f64)>>,
    #[prop(optional, into)]
    disabled: Signal<bool>,
) -> impl IntoView {
    let range = factors.with_untracked(ValueLedger::range);
    let key = StoredValue::new(item_key);

    let text = Signal::derive(move || factors.with(|f| key.with_value(|k| f.display_text(k))));
    let valid = Signal::derive(move || factors.with(|f| key.with_value(|k| f.is_text_valid(k))));

    view! {
        <td class="table__cell table__cell--input">
            <ValueInput
                text=text
                valid=valid
                disabled=disabled
                title=range_hint(range.min, range.max)
                on_input=Callback::new(move |raw: String| {
                    factors.update(|f| {
                        key.with_value(|k| f.set_text(k, &raw));
                    });
                })
                on_blur=Callback::new(move |_| {
                    let committed = factors
                        .try_update(|f| key.with_value(|k| f.blur(k)))
                        .flatten();
                    if let (Some(value), Some(on_commit)) = (committed, on_commit) {
                        on_commit.run((key.get_value(), value));
                    }
                })
            />
        </td>
    }
}

/// Costo detallado de una fila; vacío = costo del backend
#[component]
pub fn DetailedCostCell(costing: RwSignal<MaterialCosting>, item_key: String, base_cost: f64) -> impl IntoView {
    let key = StoredValue::new(item_key);
    let text = Signal::derive(move || costing.with(|c| key.with_value(|k| c.detailed.display_text(k))));
    let valid = Signal::derive(move || costing.with(|c| key.with_value(|k| c.detailed.is_text_valid(k))));
    let range = ValueRange::DETAILED_COST;

    view! {
        <td class="table__cell table__cell--input">
            <ValueInput
                text=text
                valid=valid
                placeholder=format!("{:.4}", base_cost)
                title=range_hint(range.min, range.max)
                on_input=Callback::new(move |raw: String| {
                    costing.update(|c| {
                        key.with_value(|k| c.set_detailed_text(k, &raw));
                    });
                })
                on_blur=Callback::new(move |_| {
                    costing.update(|c| {
                        key.with_value(|k| c.detailed.blur(k));
                    });
                })
            />
        </td>
    }
}

/// Monto fijo de toda la categoría
#[component]
pub fn FixedAmountInput(costing: RwSignal<MaterialCosting>) -> impl IntoView {
    let text = Signal::derive(move || costing.with(|c| c.fixed_amount.display_text.clone()));
    let valid = Signal::derive(move || {
        costing.with(|c| c.fixed_amount.is_text_valid(ValueRange::FIXED_AMOUNT, true))
    });
    let range = ValueRange::FIXED_AMOUNT;

    view! {
        <label class="fixed-amount">
            <span class="fixed-amount__label">"Monto fijo por prenda"</span>
            <ValueInput
                text=text
                valid=valid
                placeholder="0.00"
                title=range_hint(range.min, range.max)
                on_input=Callback::new(move |raw: String| {
                    costing.update(|c| {
                        c.set_fixed_amount_text(&raw);
                    });
                })
                on_blur=Callback::new(move |_| {
                    costing.update(|c| {
                        c.blur_fixed_amount();
                    });
                })
            />
        </label>
    }
}
