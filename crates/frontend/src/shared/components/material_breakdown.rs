//! Общая таблица для материалов с тремя режимами костинга (avíos, telas)

use std::future::Future;

use contracts::enums::calculation_version::CalculationVersion;
use contracts::enums::cost_category::CostCategory;
use contracts::shared::costing::totals::{category_total, line_cost};
use contracts::shared::costing::{CostLine, CostingMode, ValueLedger, ValueRange};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::table::number_format::format_cost;
use super::{
    CostingModeSelect, DetailedCostCell, FactorCell, FixedAmountInput, HeaderCheckbox, LoadStateView,
    TableCheckbox,
};
use crate::shared::api_utils::ApiError;
use crate::shared::category_state::CategoryState;
use crate::shared::list_utils::SearchInput;

/// Texts of one material table
#[derive(Clone, Copy)]
pub struct MaterialLabels {
    pub title: &'static str,
    /// BEM modifier of the `category` section
    pub css_modifier: &'static str,
    pub code_header: &'static str,
    /// Headers of the three detail columns: text, quantity, unit cost
    pub detail_headers: [&'static str; 3],
    pub search_placeholder: &'static str,
    pub empty_text: &'static str,
    pub total_label: &'static str,
}

/// Строка материала, которую умеет показывать `material_breakdown`
pub trait MaterialRow: CostLine + Clone + Send + Sync + 'static {
    const CATEGORY: CostCategory;
    const LABELS: MaterialLabels;

    fn code(&self) -> String;

    fn descripcion(&self) -> String;

    /// Already formatted detail cells: text, quantity per garment, unit cost
    fn detail_cells(&self) -> [String; 3];

    /// OPs of the style where the material appears
    fn frecuencia(&self) -> u32;

    fn fetch(
        codigo_estilo: String,
        cod_ordpros: Vec<String>,
        version: CalculationVersion,
    ) -> impl Future<Output = Result<Vec<Self>, ApiError>>;
}

/// Inputs every material table receives from the session
pub struct MaterialInputs {
    pub codigo_estilo: Signal<String>,
    pub ops: Signal<Vec<String>>,
    pub version: Signal<CalculationVersion>,
    pub on_total: Callback<f64>,
}

/// Таблица материала: загрузка, выбор, режим, ввод и итог категории.
///
/// Режим и введённые значения переживают перезагрузку набора данных того же
/// estilo; новый estilo начинает с чистых значений.
pub fn material_breakdown<T: MaterialRow>(inputs: MaterialInputs) -> impl IntoView {
    let MaterialInputs {
        codigo_estilo,
        ops,
        version,
        on_total,
    } = inputs;
    let labels = T::LABELS;
    let state = CategoryState::<T>::new(ValueLedger::factors(ValueRange::ITEM_FACTOR));
    let mode = Memo::new(move |_| state.costing.with(|c| c.mode));

    Effect::new(move |_| {
        let codigo = codigo_estilo.get().trim().to_string();
        let ops = ops.get();
        let version = version.get();
        if codigo.is_empty() || ops.is_empty() {
            state.reset();
            return;
        }
        state.enter_style(&codigo);
        let ticket = state.begin_load();
        spawn_local(async move {
            let result = T::fetch(codigo, ops, version).await;
            state.apply(ticket, result, &[]);
        });
    });

    let total = Memo::new(move |_| {
        state.items.with(|items| {
            state.selection.with(|sel| {
                state
                    .costing
                    .with(|c| state.factors.with(|f| category_total(items, sel, c, f)))
            })
        })
    });

    Effect::new(move |_| on_total.run(total.get()));

    let rows = move || {
        state
            .visible_items()
            .into_iter()
            .map(|item| {
                let key = item.key();
                let key_for_toggle = key.clone();
                let key_for_cell = key.clone();
                let base = item.base_cost_per_garment();
                let [detail_text, quantity, unit_cost] = item.detail_cells();
                let code = item.code();
                let descripcion = item.descripcion();
                let frecuencia = item.frecuencia();
                view! {
                    <tr class="table__row">
                        <TableCheckbox
                            checked=Signal::derive(move || state.is_selected(&key))
                            on_change=Callback::new(move |_| state.toggle(&key_for_toggle))
                        />
                        <td class="table__cell">{code}</td>
                        <td class="table__cell">{descripcion}</td>
                        <td class="table__cell">{detail_text}</td>
                        <td class="table__cell table__cell--number">{quantity}</td>
                        <td class="table__cell table__cell--number">{unit_cost}</td>
                        {move || match mode.get() {
                            CostingMode::Automatic => view! {
                                <FactorCell factors=state.factors item_key=key_for_cell.clone() />
                            }.into_any(),
                            CostingMode::Detailed => view! {
                                <DetailedCostCell costing=state.costing item_key=key_for_cell.clone() base_cost=base />
                            }.into_any(),
                            CostingMode::FixedAmount => view! {
                                <td class="table__cell table__cell--muted">"-"</td>
                            }.into_any(),
                        }}
                        <td class="table__cell table__cell--number">
                            {move || format_cost(state.costing.with(|c| state.factors.with(|f| line_cost(&item, c, f))))}
                        </td>
                        <td class="table__cell table__cell--number">{frecuencia}</td>
                    </tr>
                }
            })
            .collect_view()
    };

    let adjust_header = move || match mode.get() {
        CostingMode::Automatic => "Factor",
        CostingMode::Detailed => "Costo detallado",
        CostingMode::FixedAmount => "",
    };

    view! {
        <section class=format!("category category--{}", labels.css_modifier)>
            <div class="category__header">
                <h3 class="category__title">{labels.title}</h3>
                <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                    {move || format!("{} / {}", state.selected_count(), state.items.with(Vec::len))}
                </Badge>
                <CostingModeSelect
                    modes=T::CATEGORY.available_modes()
                    value=mode
                    on_change=Callback::new(move |m: CostingMode| state.costing.update(|c| c.set_mode(m)))
                />
                <SearchInput
                    value=state.query
                    on_change=Callback::new(move |q: String| state.query.set(q))
                    placeholder=labels.search_placeholder
                />
            </div>

            <Show when=move || mode.get() == CostingMode::FixedAmount>
                <FixedAmountInput costing=state.costing />
            </Show>

            <LoadStateView
                state=state.load
                empty_text=labels.empty_text
                idle_text="Seleccione al menos una OP"
            />

            <Show when=move || state.items.with(|items| !items.is_empty())>
                <table class="table">
                    <thead>
                        <tr>
                            <HeaderCheckbox
                                checked=Signal::derive(move || state.all_visible_selected())
                                partial=Signal::derive(move || state.some_visible_selected())
                                on_toggle=Callback::new(move |_| state.toggle_visible())
                            />
                            <th class="table__cell">{labels.code_header}</th>
                            <th class="table__cell">"Descripción"</th>
                            <th class="table__cell">{labels.detail_headers[0]}</th>
                            <th class="table__cell table__cell--number">{labels.detail_headers[1]}</th>
                            <th class="table__cell table__cell--number">{labels.detail_headers[2]}</th>
                            <th class="table__cell">{adjust_header}</th>
                            <th class="table__cell table__cell--number">"Costo / prenda"</th>
                            <th class="table__cell table__cell--number">"Frecuencia"</th>
                        </tr>
                    </thead>
                    <tbody>{rows}</tbody>
                    <tfoot>
                        <tr class="table__totals table__totals--grand">
                            <td class="table__cell" colspan="7">
                                {move || format!("{} ({})", labels.total_label, mode.get().display_name())}
                            </td>
                            <td class="table__cell table__cell--number">{move || format_cost(total.get())}</td>
                            <td class="table__cell"></td>
                        </tr>
                    </tfoot>
                </table>
            </Show>
        </section>
    }
}
