use contracts::domain::a003_hilo::dto::HiloDto;
use contracts::enums::calculation_version::CalculationVersion;
use contracts::shared::costing::totals::{automatic_total, hilos_total};
use contracts::shared::costing::{CostLine, ValueLedger, ValueRange};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a003_hilo::api;
use crate::shared::category_state::CategoryState;
use crate::shared::components::table::number_format::{format_cost, format_quantity};
use crate::shared::components::{FactorCell, HeaderCheckbox, LoadStateView, TableCheckbox};
use crate::shared::list_utils::SearchInput;

/// Hilados del estilo. Только автоматический режим; итог делится на
/// количество выбранных OP.
#[component]
pub fn HiloBreakdown(
    #[prop(into)]
    codigo_estilo: Signal<String>,
    #[prop(into)]
    ops: Signal<Vec<String>>,
    #[prop(into)]
    version: Signal<CalculationVersion>,
    on_total: Callback<f64>,
) -> impl IntoView {
    let state = CategoryState::<HiloDto>::new(ValueLedger::factors(ValueRange::ITEM_FACTOR));

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
            let result = api::fetch_hilos(&codigo, &ops, version).await;
            state.apply(ticket, result, &[]);
        });
    });

    let sum = Memo::new(move |_| {
        state.items.with(|items| {
            state
                .selection
                .with(|sel| state.factors.with(|f| automatic_total(items, sel, f)))
        })
    });

    let total = Memo::new(move |_| {
        let op_count = ops.with(Vec::len);
        state.items.with(|items| {
            state
                .selection
                .with(|sel| state.factors.with(|f| hilos_total(items, sel, f, op_count)))
        })
    });

    Effect::new(move |_| on_total.run(total.get()));

    let rows = move || {
        state
            .visible_items()
            .into_iter()
            .map(|hilo| {
                let key = hilo.key();
                let key_for_toggle = key.clone();
                let key_for_cost = key.clone();
                let kg = hilo.kg_por_prenda;
                let cost_kg = hilo.costo_por_kg;
                view! {
                    <tr class="table__row">
                        <TableCheckbox
                            checked=Signal::derive(move || state.is_selected(&key))
                            on_change=Callback::new(move |_| state.toggle(&key_for_toggle))
                        />
                        <td class="table__cell">{hilo.cod_hilado.clone()}</td>
                        <td class="table__cell">{hilo.tipo_hilo.clone()}</td>
                        <td class="table__cell">{hilo.descripcion.clone()}</td>
                        <td class="table__cell table__cell--number">{format_quantity(kg)}</td>
                        <td class="table__cell table__cell--number">{format_cost(cost_kg)}</td>
                        <FactorCell factors=state.factors item_key=hilo.key() />
                        <td class="table__cell table__cell--number">
                            {move || format_cost(cost_kg * state.factors.with(|f| f.factor(&key_for_cost)) * kg)}
                        </td>
                        <td class="table__cell table__cell--number">{hilo.frecuencia}</td>
                    </tr>
                }
            })
            .collect_view()
    };

    view! {
        <section class="category category--hilos">
            <div class="category__header">
                <h3 class="category__title">"Hilos"</h3>
                <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                    {move || format!("{} / {}", state.selected_count(), state.items.with(Vec::len))}
                </Badge>
                <SearchInput
                    value=state.query
                    on_change=Callback::new(move |q: String| state.query.set(q))
                    placeholder="Buscar hilado..."
                />
            </div>

            <LoadStateView
                state=state.load
                empty_text="No se encontraron hilos para las OPs seleccionadas"
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
                            <th class="table__cell">"Hilado"</th>
                            <th class="table__cell">"Tipo"</th>
                            <th class="table__cell">"Descripción"</th>
                            <th class="table__cell table__cell--number">"Kg / prenda"</th>
                            <th class="table__cell table__cell--number">"Costo / kg"</th>
                            <th class="table__cell">"Factor"</th>
                            <th class="table__cell table__cell--number">"Costo / prenda"</th>
                            <th class="table__cell table__cell--number">"Frecuencia"</th>
                        </tr>
                    </thead>
                    <tbody>{rows}</tbody>
                    <tfoot>
                        <tr class="table__totals">
                            <td class="table__cell" colspan="7">"Suma hilos seleccionados"</td>
                            <td class="table__cell table__cell--number">{move || format_cost(sum.get())}</td>
                            <td class="table__cell"></td>
                        </tr>
                        <tr class="table__totals table__totals--grand">
                            <td class="table__cell" colspan="7">
                                {move || format!("Total hilos por prenda (÷ {} OPs)", ops.with(Vec::len))}
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
