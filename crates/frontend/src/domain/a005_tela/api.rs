use contracts::domain::a005_tela::dto::TelaDto;
use contracts::enums::calculation_version::CalculationVersion;
use contracts::shared::api::{ApiListResponse, StyleCategoryQuery};

use crate::shared::api_utils::{get_json, style_url, ApiError};

pub async fn fetch_telas(
    codigo_estilo: &str,
    cod_ordpros: &[String],
    version: CalculationVersion,
) -> Result<Vec<TelaDto>, ApiError> {
    let url = style_url(codigo_estilo, "telas", &StyleCategoryQuery::new(version, cod_ordpros))?;
    let response: ApiListResponse<TelaDto> = get_json(&url).await?;
    log::debug!("{} telas for style {}", response.data.len(), codigo_estilo);
    Ok(response.data)
}
