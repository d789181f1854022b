use std::collections::BTreeMap;

use contracts::enums::calculation_version::CalculationVersion;
use leptos::prelude::*;
use thaw::*;

use super::price_panel::PricePanel;
use super::state::QuotationSession;
use crate::domain::a001_op::ui::selector::{OpSelection, OpSelector};
use crate::domain::a002_wip::ui::breakdown::WipBreakdown;
use crate::domain::a003_hilo::ui::breakdown::HiloBreakdown;
use crate::domain::a004_avio::ui::breakdown::AvioBreakdown;
use crate::domain::a005_tela::ui::breakdown::TelaBreakdown;
use crate::shared::icons::icon;

/// Страница котировки: estilo → OPs → categorías → precio
#[component]
pub fn QuotationPage() -> impl IntoView {
    let session = QuotationSession::new();
    // до виджетов: preselection читается из prefs при первой загрузке OP
    session.persist();
    provide_context(session);

    let codigo_estilo: Signal<String> = session.codigo_estilo.into();
    let version: Signal<CalculationVersion> = session.version.into();
    let selected_ops = Memo::new(move |_| session.op_selection.with(|s| s.codes.clone()));
    let ops: Signal<Vec<String>> = selected_ops.into();
    let preselection = Signal::derive(move || {
        let codigo = session.codigo_estilo.get();
        session.prefs.with(|p| p.preselection_for(&codigo))
    });

    // Sync version -> select
    let version_code = RwSignal::new(session.version.get_untracked().code().to_string());
    Effect::new(move |_| {
        version_code.set(session.version.get().code().to_string());
    });
    // Sync select -> version
    Effect::new(move |prev: Option<String>| {
        let current = version_code.get();
        if prev.is_some() && prev.as_ref() != Some(&current) {
            if let Some(v) = CalculationVersion::from_code(&current) {
                if v != session.version.get_untracked() {
                    session.version.set(v);
                }
            }
        }
        current
    });

    let has_style = move || !session.codigo_estilo.with(String::is_empty);
    let has_wip_adjustments = Signal::derive(move || !session.wip_factors.with(BTreeMap::is_empty));

    view! {
        <div class="quotation">
            <form
                class="quotation__form"
                on:submit=move |ev| {
                    ev.prevent_default();
                    session.apply_codigo();
                }
            >
                <Flex gap=FlexGap::Small align=FlexAlign::End>
                    <label class="quotation__field">
                        <span>"Código de estilo"</span>
                        <Input value=session.codigo_input placeholder="Ej. 18420" />
                    </label>
                    <label class="quotation__field">
                        <span>"Versión de cálculo"</span>
                        <Select value=version_code>
                            {CalculationVersion::all()
                                .into_iter()
                                .map(|v| view! { <option value=v.code()>{v.display_name()}</option> })
                                .collect_view()}
                        </Select>
                    </label>
                    <Button appearance=ButtonAppearance::Primary button_type=ButtonType::Submit>
                        {icon("refresh")}
                        " Cargar"
                    </Button>
                </Flex>
            </form>

            <Show
                when=has_style
                fallback=|| view! {
                    <div class="load-state load-state--idle">
                        "Ingrese un código de estilo para iniciar la cotización"
                    </div>
                }
            >
                <div class="quotation__layout">
                    <div class="quotation__categories">
                        <OpSelector
                            codigo_estilo=codigo_estilo
                            version=version
                            preselection=preselection
                            on_selection_change=Callback::new(move |selection: OpSelection| {
                                session.op_selection.set(selection);
                            })
                        />

                        <div class="quotation__toolbar">
                            <Button
                                appearance=ButtonAppearance::Subtle
                                disabled=Signal::derive(move || !has_wip_adjustments.get())
                                on_click=move |_| session.wip_factors.set(BTreeMap::new())
                            >
                                "Restablecer factores WIP"
                            </Button>
                        </div>
                        <WipBreakdown
                            ops=ops
                            version=version
                            shared_factors=session.shared_wip_factors()
                            on_totals=Callback::new(move |totals| session.wip_totals.set(totals))
                        />

                        <HiloBreakdown
                            codigo_estilo=codigo_estilo
                            ops=ops
                            version=version
                            on_total=Callback::new(move |total| session.hilos_total.set(total))
                        />
                        <AvioBreakdown
                            codigo_estilo=codigo_estilo
                            ops=ops
                            version=version
                            on_total=Callback::new(move |total| session.avios_total.set(total))
                        />
                        <TelaBreakdown
                            codigo_estilo=codigo_estilo
                            ops=ops
                            version=version
                            on_total=Callback::new(move |total| session.telas_total.set(total))
                        />
                    </div>
                    <PricePanel session=session />
                </div>
            </Show>
        </div>
    }
}
