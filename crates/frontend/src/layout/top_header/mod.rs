//! TopHeader - верхняя панель: название и переключение вкладок

use crate::layout::global_context::{AppGlobalContext, AppPage};
use crate::shared::icons::icon;
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().unwrap_or_default();

    let tabs = AppPage::all()
        .into_iter()
        .map(|page| {
            let icon_name = match page {
                AppPage::Cotizacion => "calculator",
                AppPage::HistorialPrecios => "chart",
            };
            view! {
                <button
                    class="top-header__tab"
                    class:top-header__tab--active=move || ctx.active.get() == page
                    on:click=move |_| ctx.activate(page)
                >
                    {icon(icon_name)}
                    <span>{page.title()}</span>
                </button>
            }
        })
        .collect_view();

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <span class="top-header__title">"Sistema Cotizador TDV"</span>
            </div>
            <nav class="top-header__tabs">{tabs}</nav>
        </div>
    }
}
