use contracts::domain::a003_hilo::dto::HiloDto;
use contracts::enums::calculation_version::CalculationVersion;
use contracts::shared::api::{ApiListResponse, StyleCategoryQuery};

use crate::shared::api_utils::{get_json, style_url, ApiError};

/// Hilados consumidos por el estilo en las OPs dadas
pub async fn fetch_hilos(
    codigo_estilo: &str,
    cod_ordpros: &[String],
    version: CalculationVersion,
) -> Result<Vec<HiloDto>, ApiError> {
    let url = style_url(codigo_estilo, "hilos", &StyleCategoryQuery::new(version, cod_ordpros))?;
    let response: ApiListResponse<HiloDto> = get_json(&url).await?;
    Ok(response.data)
}
