use leptos::prelude::*;

/// Числовое поле ввода для факторов и стоимостей.
///
/// Показывает текст как набран; невалидный текст подсвечивается, но
/// решение о фиксации значения принимает владелец ledger'а.
#[component]
pub fn ValueInput(
    #[prop(into)]
    text: Signal<String>,
    #[prop(into)]
    valid: Signal<bool>,
    on_input: Callback<String>,
    on_blur: Callback<()>,
    #[prop(optional, into)]
    disabled: Signal<bool>,
    #[prop(optional, into)]
    placeholder: String,
    /// Подсказка с допустимым диапазоном
    #[prop(optional, into)]
    title: String,
) -> impl IntoView {
    view! {
        <input
            type="text"
            inputmode="decimal"
            class="value-input"
            class:value-input--invalid=move || !valid.get()
            placeholder=placeholder
            title=title
            prop:value=move || text.get()
            prop:disabled=disabled
            on:input=move |ev| on_input.run(event_target_value(&ev))
            on:blur=move |_| on_blur.run(())
        />
    }
}

/// Range hint shown as the input tooltip
pub fn range_hint(min: f64, max: f64) -> String {
    format!("Rango permitido: {} – {}", min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_hint() {
        assert_eq!(range_hint(0.1, 10.0), "Rango permitido: 0.1 – 10");
    }
}
