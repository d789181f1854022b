use std::future::Future;

use contracts::domain::a004_avio::dto::AvioDto;
use contracts::enums::calculation_version::CalculationVersion;
use contracts::enums::cost_category::CostCategory;
use leptos::prelude::*;

use crate::domain::a004_avio::api;
use crate::shared::api_utils::ApiError;
use crate::shared::components::material_breakdown::{
    material_breakdown, MaterialInputs, MaterialLabels, MaterialRow,
};
use crate::shared::components::table::number_format::{format_cost, format_quantity};

impl MaterialRow for AvioDto {
    const CATEGORY: CostCategory = CostCategory::Avio;
    const LABELS: MaterialLabels = MaterialLabels {
        title: "Avíos",
        css_modifier: "avios",
        code_header: "Avío",
        detail_headers: ["Unidad", "Und. / prenda", "Costo unitario"],
        search_placeholder: "Buscar avío...",
        empty_text: "No se encontraron avíos para las OPs seleccionadas",
        total_label: "Total avíos por prenda",
    };

    fn code(&self) -> String {
        self.cod_avio.clone()
    }

    fn descripcion(&self) -> String {
        self.descripcion.clone()
    }

    fn detail_cells(&self) -> [String; 3] {
        [
            self.unidad.clone(),
            format_quantity(self.unidades_por_prenda),
            format_cost(self.costo_unitario),
        ]
    }

    fn frecuencia(&self) -> u32 {
        self.frecuencia
    }

    fn fetch(
        codigo_estilo: String,
        cod_ordpros: Vec<String>,
        version: CalculationVersion,
    ) -> impl Future<Output = Result<Vec<Self>, ApiError>> {
        async move { api::fetch_avios(&codigo_estilo, &cod_ordpros, version).await }
    }
}

/// Avíos del estilo (tres modos de costeo)
#[component]
pub fn AvioBreakdown(
    #[prop(into)]
    codigo_estilo: Signal<String>,
    #[prop(into)]
    ops: Signal<Vec<String>>,
    #[prop(into)]
    version: Signal<CalculationVersion>,
    on_total: Callback<f64>,
) -> impl IntoView {
    material_breakdown::<AvioDto>(MaterialInputs {
        codigo_estilo,
        ops,
        version,
        on_total,
    })
}
