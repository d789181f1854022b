use contracts::domain::a001_op::dto::OpDto;
use contracts::enums::calculation_version::CalculationVersion;
use contracts::shared::api::{ApiListResponse, StyleCategoryQuery};

use crate::shared::api_utils::{get_json, style_url, ApiError};

/// Reference production orders of a style
pub async fn fetch_ops(codigo_estilo: &str, version: CalculationVersion) -> Result<Vec<OpDto>, ApiError> {
    let query = StyleCategoryQuery::new::<&str>(version, &[]);
    let url = style_url(codigo_estilo, "ops", &query)?;
    let response: ApiListResponse<OpDto> = get_json(&url).await?;
    log::debug!("{} OPs for style {}", response.data.len(), codigo_estilo);
    Ok(response.data)
}
