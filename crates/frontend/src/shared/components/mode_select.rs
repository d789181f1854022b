use contracts::shared::costing::CostingMode;
use leptos::prelude::*;
use thaw::*;

/// Переключатель режима костинга категории материалов
#[component]
pub fn CostingModeSelect(
    modes: &'static [CostingMode],
    #[prop(into)]
    value: Signal<CostingMode>,
    on_change: Callback<CostingMode>,
) -> impl IntoView {
    view! {
        <Flex gap=FlexGap::Small class="mode-select">
            {modes
                .iter()
                .copied()
                .map(|mode| {
                    let appearance = Signal::derive(move || {
                        if value.get() == mode {
                            ButtonAppearance::Primary
                        } else {
                            ButtonAppearance::Secondary
                        }
                    });
                    view! {
                        <Button
                            size=ButtonSize::Small
                            appearance=appearance
                            on_click=move |_| on_change.run(mode)
                        >
                            {mode.display_name()}
                        </Button>
                    }
                })
                .collect_view()}
        </Flex>
    }
}
