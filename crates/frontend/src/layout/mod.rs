pub mod global_context;
pub mod top_header;

use crate::layout::global_context::{AppGlobalContext, AppPage};
use crate::layout::top_header::TopHeader;
use crate::projections::p900_price_history::ui::lookup::PriceHistoryLookup;
use crate::usecases::u501_quotation::view::QuotationPage;
use leptos::prelude::*;

/// Каркас приложения.
///
/// Обе страницы остаются смонтированными, скрывается только неактивная,
/// чтобы сессия котировки не терялась при переключении вкладок.
#[component]
pub fn Shell() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().unwrap_or_default();
    let hidden = move |page: AppPage| ctx.active.get() != page;

    view! {
        <div class="app">
            <TopHeader />
            <main class="app__content">
                <div class="page" class:page--hidden=move || hidden(AppPage::Cotizacion)>
                    <QuotationPage />
                </div>
                <div class="page" class:page--hidden=move || hidden(AppPage::HistorialPrecios)>
                    <PriceHistoryLookup />
                </div>
            </main>
        </div>
    }
}
