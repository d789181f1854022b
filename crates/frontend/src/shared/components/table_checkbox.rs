use leptos::prelude::*;

/// Чекбокс строки таблицы
///
/// Рендерит <td>; клик не всплывает до строки.
///
/// ```text
/// <TableCheckbox
///     checked=Signal::derive(move || selection.with(|s| s.contains(&key)))
///     on_change=Callback::new(move |_| toggle(key.clone()))
/// />
/// ```
#[component]
pub fn TableCheckbox(
    checked: Signal<bool>,
    on_change: Callback<bool>,
    #[prop(optional, into)]
    disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <td
            class="table__cell table__cell--checkbox"
            on:click=|e| e.stop_propagation()
        >
            <input
                type="checkbox"
                class="table__checkbox"
                prop:checked=checked
                prop:disabled=disabled
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </td>
    }
}

/// Чекбокс "seleccionar todo" в заголовке.
///
/// Acts on the rows currently visible; `partial` renders the indeterminate
/// state when only some of them are selected.
#[component]
pub fn HeaderCheckbox(
    checked: Signal<bool>,
    partial: Signal<bool>,
    on_toggle: Callback<()>,
    #[prop(optional, into)]
    disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <th class="table__cell table__cell--checkbox">
            <input
                type="checkbox"
                class="table__checkbox"
                title="Seleccionar todo lo visible"
                prop:checked=checked
                prop:indeterminate=move || partial.get() && !checked.get()
                prop:disabled=disabled
                on:change=move |_| on_toggle.run(())
            />
        </th>
    }
}
