use contracts::domain::a004_avio::dto::AvioDto;
use contracts::enums::calculation_version::CalculationVersion;
use contracts::shared::api::{ApiListResponse, StyleCategoryQuery};

use crate::shared::api_utils::{get_json, style_url, ApiError};

/// Avíos del estilo en las OPs dadas
pub async fn fetch_avios(
    codigo_estilo: &str,
    cod_ordpros: &[String],
    version: CalculationVersion,
) -> Result<Vec<AvioDto>, ApiError> {
    let url = style_url(codigo_estilo, "avios", &StyleCategoryQuery::new(version, cod_ordpros))?;
    let response: ApiListResponse<AvioDto> = get_json(&url).await?;
    Ok(response.data)
}
