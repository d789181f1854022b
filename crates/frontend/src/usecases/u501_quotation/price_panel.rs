use contracts::shared::costing::quotation::{FACTOR_ESFUERZO, FACTOR_MARCA, FACTOR_MARGEN, PRICE_FACTOR_KEYS};
use contracts::shared::costing::ValueRange;
use leptos::prelude::*;
use thaw::*;

use super::state::{parse_prendas, QuotationSession};
use crate::shared::components::table::number_format::{format_cost, format_money, format_number_int};
use crate::shared::components::value_input::{range_hint, ValueInput};

fn factor_label(key: &str) -> &'static str {
    match key {
        FACTOR_MARGEN => "Margen",
        FACTOR_MARCA => "Marca",
        FACTOR_ESFUERZO => "Esfuerzo",
        _ => "Factor",
    }
}

/// Поле одного фактора цены (rango 0.1 – 3)
#[component]
fn PriceFactorInput(session: QuotationSession, factor_key: &'static str) -> impl IntoView {
    let ledger = session.price_factors;
    let range = ValueRange::PRICE_FACTOR;
    view! {
        <label class="price-panel__field">
            <span>{factor_label(factor_key)}</span>
            <ValueInput
                text=Signal::derive(move || ledger.with(|l| l.display_text(factor_key)))
                valid=Signal::derive(move || ledger.with(|l| l.is_text_valid(factor_key)))
                title=range_hint(range.min, range.max)
                on_input=Callback::new(move |raw: String| {
                    ledger.update(|l| {
                        l.set_text(factor_key, &raw);
                    });
                })
                on_blur=Callback::new(move |_| {
                    ledger.update(|l| {
                        l.blur(factor_key);
                    });
                })
            />
        </label>
    }
}

/// Панель цены: итоги категорий → costo por prenda → precio → total pedido
#[component]
pub fn PricePanel(session: QuotationSession) -> impl IntoView {
    let breakdown = Memo::new(move |_| session.breakdown());
    let prendas_valid = Signal::derive(move || session.prendas_text.with(|t| parse_prendas(t).is_some()));

    let line = move |label: &'static str, value: Signal<f64>| {
        view! {
            <tr class="table__row">
                <td class="table__cell">{label}</td>
                <td class="table__cell table__cell--number">{move || format_cost(value.get())}</td>
            </tr>
        }
    };

    view! {
        <aside class="price-panel">
            <h3 class="category__title">"Precio de la cotización"</h3>

            <div class="price-panel__inputs">
                {PRICE_FACTOR_KEYS
                    .iter()
                    .map(|key| view! { <PriceFactorInput session=session factor_key=*key /> })
                    .collect_view()}
                <label class="price-panel__field">
                    <span>"Prendas"</span>
                    <ValueInput
                        text=session.prendas_text
                        valid=prendas_valid
                        title="Cantidad de prendas del pedido"
                        on_input=Callback::new(move |raw: String| session.prendas_text.set(raw))
                        on_blur=Callback::new(move |_| {
                            if let Some(n) = session.prendas_text.with_untracked(|t| parse_prendas(t)) {
                                session.prendas_text.set(n.to_string());
                            }
                        })
                    />
                </label>
            </div>

            <table class="table table--compact">
                <tbody>
                    {line("WIP textil", Signal::derive(move || breakdown.get().totals.wip.textil))}
                    {line("WIP manufactura", Signal::derive(move || breakdown.get().totals.wip.manufactura))}
                    {line("Hilos", Signal::derive(move || breakdown.get().totals.hilos))}
                    {line("Avíos", Signal::derive(move || breakdown.get().totals.avios))}
                    {line("Telas", Signal::derive(move || breakdown.get().totals.telas))}
                    <tr class="table__totals">
                        <td class="table__cell">"Costo por prenda"</td>
                        <td class="table__cell table__cell--number">{move || format_cost(breakdown.get().costo_por_prenda)}</td>
                    </tr>
                    <tr class="table__row">
                        <td class="table__cell">"Factor combinado"</td>
                        <td class="table__cell table__cell--number">{move || format!("× {:.3}", breakdown.get().factors.combined())}</td>
                    </tr>
                    <tr class="table__totals">
                        <td class="table__cell">"Precio por prenda"</td>
                        <td class="table__cell table__cell--number">{move || format_cost(breakdown.get().precio_por_prenda)}</td>
                    </tr>
                    <tr class="table__row">
                        <td class="table__cell">"Markup"</td>
                        <td class="table__cell table__cell--number">{move || format!("{:.1}%", breakdown.get().markup() * 100.0)}</td>
                    </tr>
                </tbody>
            </table>

            <div class="price-panel__total">
                <span>{move || format!("Total pedido ({} prendas)", format_number_int(breakdown.get().prendas as f64))}</span>
                <strong>{move || format_money(breakdown.get().total_pedido)}</strong>
            </div>

            <Show when=move || session.op_selection.with(|s| !s.codes.is_empty())>
                <div class="price-panel__reference">
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Informative>
                        {move || format!(
                            "Costo promedio OPs de referencia: {}",
                            format_cost(session.op_selection.with(|s| s.average_cost))
                        )}
                    </Badge>
                </div>
            </Show>
        </aside>
    }
}
