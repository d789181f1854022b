use std::future::Future;

use contracts::domain::a005_tela::dto::TelaDto;
use contracts::enums::calculation_version::CalculationVersion;
use contracts::enums::cost_category::CostCategory;
use leptos::prelude::*;

use crate::domain::a005_tela::api;
use crate::shared::api_utils::ApiError;
use crate::shared::components::material_breakdown::{
    material_breakdown, MaterialInputs, MaterialLabels, MaterialRow,
};
use crate::shared::components::table::number_format::{format_cost, format_quantity};

impl MaterialRow for TelaDto {
    const CATEGORY: CostCategory = CostCategory::Tela;
    const LABELS: MaterialLabels = MaterialLabels {
        title: "Telas",
        css_modifier: "telas",
        code_header: "Tela",
        detail_headers: ["Tipo", "Kg / prenda", "Precio / kg"],
        search_placeholder: "Buscar tela...",
        empty_text: "No se encontraron telas para las OPs seleccionadas",
        total_label: "Total telas por prenda",
    };

    fn code(&self) -> String {
        self.cod_tela.clone()
    }

    fn descripcion(&self) -> String {
        self.descripcion.clone()
    }

    fn detail_cells(&self) -> [String; 3] {
        [
            self.tipo_tela.clone().unwrap_or_default(),
            format_quantity(self.kg_por_prenda),
            format_cost(self.precio_por_kg),
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
        async move { api::fetch_telas(&codigo_estilo, &cod_ordpros, version).await }
    }
}

/// Telas del estilo, costeadas por kg
#[component]
pub fn TelaBreakdown(
    #[prop(into)]
    codigo_estilo: Signal<String>,
    #[prop(into)]
    ops: Signal<Vec<String>>,
    #[prop(into)]
    version: Signal<CalculationVersion>,
    on_total: Callback<f64>,
) -> impl IntoView {
    material_breakdown::<TelaDto>(MaterialInputs {
        codigo_estilo,
        ops,
        version,
        on_total,
    })
}
