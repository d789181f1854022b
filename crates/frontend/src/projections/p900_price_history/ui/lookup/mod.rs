use contracts::projections::p900_price_history::dto::PriceHistorySeries;
use contracts::projections::p900_price_history::series::LookupState;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::projections::p900_price_history::api;
use crate::projections::p900_price_history::state::{PairedFetch, PriceSource};
use crate::projections::p900_price_history::ui::chart::PriceChart;
use crate::shared::components::table::number_format::format_cost;
use crate::shared::date_utils::format_month;
use crate::shared::icons::icon;
use crate::shared::request_guard::RequestGuard;

fn cost_or_dash(value: Option<f64>) -> String {
    value.map(format_cost).unwrap_or_else(|| "-".to_string())
}

fn months_table(series: PriceHistorySeries) -> impl IntoView {
    let rows = series
        .months
        .iter()
        .enumerate()
        .rev()
        .map(|(i, month)| {
            view! {
                <tr class="table__row">
                    <td class="table__cell">{format_month(month)}</td>
                    <td class="table__cell table__cell--number">{cost_or_dash(series.almacen[i])}</td>
                    <td class="table__cell table__cell--number">{cost_or_dash(series.orden_compra[i])}</td>
                </tr>
            }
        })
        .collect_view();

    view! {
        <table class="table table--compact">
            <thead>
                <tr>
                    <th class="table__cell">"Mes"</th>
                    <th class="table__cell table__cell--number">{PriceSource::Almacen.label()}</th>
                    <th class="table__cell table__cell--number">{PriceSource::OrdenCompra.label()}</th>
                </tr>
            </thead>
            <tbody>{rows}</tbody>
        </table>
    }
}

/// Búsqueda del histórico de precios de un material (almacén + orden de compra)
#[component]
pub fn PriceHistoryLookup() -> impl IntoView {
    let codigo = RwSignal::new(String::new());
    let lookup = RwSignal::new(LookupState::Idle);
    let paired = RwSignal::new(PairedFetch::default());
    let guard = StoredValue::new(RequestGuard::new());

    let search = move || {
        let code = codigo.get_untracked().trim().to_string();
        if code.is_empty() {
            guard.with_value(|g| g.invalidate());
            lookup.set(LookupState::Idle);
            return;
        }
        let ticket = guard.with_value(|g| g.issue());
        paired.set(PairedFetch::new(&code));
        lookup.set(LookupState::start(&code));

        // два запроса параллельно, результат собирает PairedFetch
        for source in [PriceSource::Almacen, PriceSource::OrdenCompra] {
            let code = code.clone();
            spawn_local(async move {
                let result = api::fetch_price_records(&code, source).await;
                if !guard.with_value(|g| g.is_current(ticket)) {
                    return;
                }
                if let Some(state) = paired.try_update(|p| p.record(source, result)).flatten() {
                    if let LookupState::Failed { message, .. } = &state {
                        log::warn!("Price history for {} failed: {}", code, message);
                    }
                    lookup.set(state);
                }
            });
        }
    };

    let clear = move |_| {
        guard.with_value(|g| g.invalidate());
        codigo.set(String::new());
        lookup.set(LookupState::Idle);
    };

    let result_view = move || match lookup.get() {
        LookupState::Idle => view! {
            <div class="load-state load-state--idle">"Ingrese el código de una tela, hilo o avío"</div>
        }
        .into_any(),
        LookupState::Searching { codigo } => view! {
            <Flex gap=FlexGap::Small class="load-state load-state--loading">
                <Spinner size=SpinnerSize::Tiny />
                <span>{format!("Buscando {}...", codigo)}</span>
            </Flex>
        }
        .into_any(),
        LookupState::Empty { codigo } => view! {
            <div class="load-state load-state--empty">
                {format!("No hay historial de precios para {}", codigo)}
            </div>
        }
        .into_any(),
        LookupState::Failed { codigo, message } => view! {
            <div class="load-state load-state--error">
                {format!("Error al consultar {}: {}", codigo, message)}
            </div>
        }
        .into_any(),
        LookupState::Found(series) => view! {
            <div class="price-history__result">
                <div class="price-history__legend">
                    <span class="legend legend--almacen">{PriceSource::Almacen.label()}</span>
                    <span class="legend legend--oc">{PriceSource::OrdenCompra.label()}</span>
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                        {format!("{} meses", series.len())}
                    </Badge>
                </div>
                <PriceChart series=series.clone() />
                {months_table(series)}
            </div>
        }
        .into_any(),
    };

    view! {
        <section class="price-history">
            <div class="category__header">
                <h3 class="category__title">{icon("chart")}" Historial de precios"</h3>
            </div>
            <form
                class="price-history__form"
                on:submit=move |ev| {
                    ev.prevent_default();
                    search();
                }
            >
                <Flex gap=FlexGap::Small>
                    <Input value=codigo placeholder="Código de material" />
                    <Button
                        appearance=ButtonAppearance::Primary
                        button_type=ButtonType::Submit
                        disabled=Signal::derive(move || lookup.with(LookupState::is_searching))
                    >
                        {icon("search")}
                        " Buscar"
                    </Button>
                    <Button appearance=ButtonAppearance::Subtle on_click=clear>
                        {icon("x")}
                        " Limpiar"
                    </Button>
                </Flex>
            </form>
            {result_view}
        </section>
    }
}
