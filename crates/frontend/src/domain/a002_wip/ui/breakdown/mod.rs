use contracts::domain::a002_wip::dto::WipDesgloseDto;
use contracts::enums::calculation_version::CalculationVersion;
use contracts::shared::costing::totals::{eligible_wip_rows, wip_totals};
use contracts::shared::costing::{CommitPolicy, ValueLedger, ValueRange, WipTotals};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a002_wip::api;
use crate::shared::category_state::{CategoryState, SharedFactors};
use crate::shared::components::table::number_format::format_cost;
use crate::shared::components::{FactorCell, HeaderCheckbox, LoadStateView, TableCheckbox};
use crate::shared::list_utils::SearchInput;

/// Desglose WIP: textil + manufactura по этапам процесса.
///
/// Факторы фиксируются только на blur. Если передан `shared_factors`,
/// каноническая карта факторов принадлежит родителю.
#[component]
pub fn WipBreakdown(
    #[prop(into)]
    ops: Signal<Vec<String>>,
    #[prop(into)]
    version: Signal<CalculationVersion>,
    on_totals: Callback<WipTotals>,
    #[prop(optional)]
    shared_factors: Option<SharedFactors>,
) -> impl IntoView {
    let state = CategoryState::<WipDesgloseDto>::new(
        ValueLedger::factors(ValueRange::ITEM_FACTOR).with_policy(CommitPolicy::OnBlur),
    );
    if let Some(owner) = shared_factors {
        state.mirror_factors(owner);
    }
    let on_commit = shared_factors.map(|owner| owner.on_commit);

    Effect::new(move |_| {
        let ops = ops.get();
        let version = version.get();
        if ops.is_empty() {
            state.reset();
            return;
        }
        let ticket = state.begin_load();
        spawn_local(async move {
            // строки без стоимости не показываются и не выбираются
            let result = api::fetch_desglose(ops, version)
                .await
                .map(|rows| eligible_wip_rows(&rows));
            state.apply(ticket, result, &[]);
        });
    });

    let totals = Memo::new(move |_| {
        state.items.with(|rows| {
            state
                .selection
                .with(|sel| state.factors.with(|f| wip_totals(rows, sel, f)))
        })
    });

    Effect::new(move |_| on_totals.run(totals.get()));

    let rows = move || {
        state
            .visible_items()
            .into_iter()
            .map(|row| {
                let key = row.wip_id.clone();
                let key_for_toggle = key.clone();
                let key_for_subtotal = key.clone();
                let base = row.costo_textil_por_prenda + row.costo_manufactura_por_prenda;
                view! {
                    <tr class="table__row">
                        <TableCheckbox
                            checked=Signal::derive(move || state.is_selected(&key))
                            on_change=Callback::new(move |_| state.toggle(&key_for_toggle))
                        />
                        <td class="table__cell">{row.wip_id.clone()}</td>
                        <td class="table__cell">{row.descripcion.clone()}</td>
                        <td class="table__cell table__cell--number">{format_cost(row.costo_textil_por_prenda)}</td>
                        <td class="table__cell table__cell--number">{format_cost(row.costo_manufactura_por_prenda)}</td>
                        <FactorCell factors=state.factors item_key=row.wip_id.clone() on_commit=on_commit />
                        <td class="table__cell table__cell--number">
                            {move || format_cost(base * state.factors.with(|f| f.factor(&key_for_subtotal)))}
                        </td>
                        <td class="table__cell table__cell--number">{row.frecuencia}</td>
                    </tr>
                }
            })
            .collect_view()
    };

    view! {
        <section class="category category--wip">
            <div class="category__header">
                <h3 class="category__title">"WIPs"</h3>
                <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                    {move || format!("{} / {}", state.selected_count(), state.items.with(Vec::len))}
                </Badge>
                <SearchInput
                    value=state.query
                    on_change=Callback::new(move |q: String| state.query.set(q))
                    placeholder="Buscar WIP..."
                />
            </div>

            <LoadStateView
                state=state.load
                empty_text="Las OPs seleccionadas no tienen costos WIP"
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
                            <th class="table__cell">"WIP"</th>
                            <th class="table__cell">"Descripción"</th>
                            <th class="table__cell table__cell--number">"Textil"</th>
                            <th class="table__cell table__cell--number">"Manufactura"</th>
                            <th class="table__cell">"Factor"</th>
                            <th class="table__cell table__cell--number">"Subtotal"</th>
                            <th class="table__cell table__cell--number">"Frecuencia"</th>
                        </tr>
                    </thead>
                    <tbody>{rows}</tbody>
                    <tfoot>
                        <tr class="table__totals">
                            <td class="table__cell" colspan="3">"Total WIP por prenda"</td>
                            <td class="table__cell table__cell--number">{move || format_cost(totals.get().textil)}</td>
                            <td class="table__cell table__cell--number">{move || format_cost(totals.get().manufactura)}</td>
                            <td class="table__cell"></td>
                            <td class="table__cell table__cell--number">{move || format_cost(totals.get().total())}</td>
                            <td class="table__cell"></td>
                        </tr>
                    </tfoot>
                </table>
            </Show>
        </section>
    }
}
