use contracts::domain::a002_wip::dto::{WipDesgloseDto, WipDesgloseRequest};
use contracts::enums::calculation_version::CalculationVersion;
use contracts::shared::api::ApiListResponse;

use crate::shared::api_utils::{post_json, proxy_url, ApiError};

/// Desglose de costos por WIP de las OPs seleccionadas
pub async fn fetch_desglose(
    cod_ordpros: Vec<String>,
    version: CalculationVersion,
) -> Result<Vec<WipDesgloseDto>, ApiError> {
    let request = WipDesgloseRequest {
        cod_ordpros,
        version_calculo: version,
    };
    let response: ApiListResponse<WipDesgloseDto> =
        post_json(&proxy_url("wip/desglose"), &request).await?;
    Ok(response.data)
}
