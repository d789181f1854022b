use leptos::prelude::*;
use thaw::*;

use crate::shared::load_state::LoadState;

/// Индикатор загрузки / пустого результата / ошибки над таблицей
#[component]
pub fn LoadStateView(
    #[prop(into)]
    state: Signal<LoadState>,
    /// Текст для пустого ответа
    empty_text: &'static str,
    /// Текст, пока не выбраны входные данные
    #[prop(optional)]
    idle_text: Option<&'static str>,
) -> impl IntoView {
    move || match state.get() {
        LoadState::Idle => idle_text
            .map(|text| view! { <div class="load-state load-state--idle">{text}</div> }.into_any())
            .unwrap_or_else(|| view! {}.into_any()),
        LoadState::Loading => view! {
            <Flex gap=FlexGap::Small class="load-state load-state--loading">
                <Spinner size=SpinnerSize::Tiny />
                <span>"Cargando..."</span>
            </Flex>
        }
        .into_any(),
        LoadState::Empty => view! { <div class="load-state load-state--empty">{empty_text}</div> }.into_any(),
        LoadState::Failed(message) => view! {
            <div class="load-state load-state--error">{message}</div>
        }
        .into_any(),
        LoadState::Loaded(_) => view! {}.into_any(),
    }
}
