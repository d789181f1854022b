use contracts::domain::a001_op::dto::{average_reference_cost, OpDto};
use contracts::enums::calculation_version::CalculationVersion;
use contracts::shared::costing::{ValueLedger, ValueRange};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_op::api;
use crate::shared::category_state::CategoryState;
use crate::shared::components::table::number_format::{format_cost, format_number_int};
use crate::shared::components::{HeaderCheckbox, LoadStateView, TableCheckbox};
use crate::shared::date_utils::format_date;
use crate::shared::list_utils::SearchInput;

/// Selected reference orders reported to the session
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OpSelection {
    pub codes: Vec<String>,
    /// Average per-garment cost of the selected OPs
    pub average_cost: f64,
}

/// Таблица OP de referencia для выбранного estilo
#[component]
pub fn OpSelector(
    #[prop(into)]
    codigo_estilo: Signal<String>,
    #[prop(into)]
    version: Signal<CalculationVersion>,
    on_selection_change: Callback<OpSelection>,
    /// Коды OP, отмеченные при первой загрузке (вместо "все")
    #[prop(optional, into)]
    preselection: Option<Signal<Vec<String>>>,
) -> impl IntoView {
    // OPs have no factors, the ledger stays empty
    let state = CategoryState::<OpDto>::new(ValueLedger::factors(ValueRange::ITEM_FACTOR));

    Effect::new(move |_| {
        let codigo = codigo_estilo.get().trim().to_string();
        let version = version.get();
        if codigo.is_empty() {
            state.reset();
            return;
        }
        let preselected = preselection.map(|p| p.get_untracked()).unwrap_or_default();
        let ticket = state.begin_load();
        spawn_local(async move {
            let result = api::fetch_ops(&codigo, version).await;
            state.apply(ticket, result, &preselected);
        });
    });

    Effect::new(move |_| {
        let selection = state.selection.get();
        let average_cost = state.items.with(|ops| average_reference_cost(ops, &selection));
        on_selection_change.run(OpSelection {
            codes: selection.to_vec(),
            average_cost,
        });
    });

    let rows = move || {
        state
            .visible_items()
            .into_iter()
            .map(|op| {
                let key = op.cod_ordpro.clone();
                let key_for_toggle = key.clone();
                view! {
                    <tr class="table__row">
                        <TableCheckbox
                            checked=Signal::derive(move || state.is_selected(&key))
                            on_change=Callback::new(move |_| state.toggle(&key_for_toggle))
                        />
                        <td class="table__cell">{op.cod_ordpro.clone()}</td>
                        <td class="table__cell">{op.cliente.clone().unwrap_or_default()}</td>
                        <td class="table__cell">
                            {op.fecha_facturacion.as_deref().map(format_date).unwrap_or_default()}
                        </td>
                        <td class="table__cell table__cell--number">{format_number_int(op.prendas_requeridas)}</td>
                        <td class="table__cell table__cell--number">{format_number_int(op.prendas_facturadas)}</td>
                        <td class="table__cell table__cell--number">{format_cost(op.costo_por_prenda)}</td>
                        <td class="table__cell table__cell--number">
                            {op.esfuerzo_total.map(format_cost).unwrap_or_else(|| "-".to_string())}
                        </td>
                    </tr>
                }
            })
            .collect_view()
    };

    let average = move || {
        state
            .items
            .with(|ops| state.selection.with(|sel| average_reference_cost(ops, sel)))
    };

    view! {
        <section class="category category--ops">
            <div class="category__header">
                <h3 class="category__title">"OPs de referencia"</h3>
                <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                    {move || format!("{} / {}", state.selected_count(), state.items.with(Vec::len))}
                </Badge>
                <SearchInput
                    value=state.query
                    on_change=Callback::new(move |q: String| state.query.set(q))
                    placeholder="Buscar OP o cliente..."
                />
            </div>

            <LoadStateView
                state=state.load
                empty_text="El estilo no tiene OPs para esta versión de cálculo"
                idle_text="Ingrese un código de estilo"
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
                            <th class="table__cell">"OP"</th>
                            <th class="table__cell">"Cliente"</th>
                            <th class="table__cell">"Facturación"</th>
                            <th class="table__cell table__cell--number">"Prendas req."</th>
                            <th class="table__cell table__cell--number">"Prendas fact."</th>
                            <th class="table__cell table__cell--number">"Costo / prenda"</th>
                            <th class="table__cell table__cell--number">"Esfuerzo"</th>
                        </tr>
                    </thead>
                    <tbody>{rows}</tbody>
                    <tfoot>
                        <tr class="table__totals">
                            <td class="table__cell" colspan="6">"Promedio OPs seleccionadas"</td>
                            <td class="table__cell table__cell--number">{move || format_cost(average())}</td>
                            <td class="table__cell"></td>
                        </tr>
                    </tfoot>
                </table>
            </Show>
        </section>
    }
}
