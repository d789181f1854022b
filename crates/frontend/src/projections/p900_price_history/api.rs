use contracts::projections::p900_price_history::dto::PriceRecordDto;
use contracts::shared::api::ApiListResponse;

use crate::shared::api_utils::{encode_segment, get_json, proxy_url, ApiError};

use super::state::PriceSource;

/// Histórico de un material en una de las dos fuentes.
///
/// 404 значит "нет записей" для этого кода, а не ошибку транспорта.
pub async fn fetch_price_records(codigo: &str, source: PriceSource) -> Result<Vec<PriceRecordDto>, ApiError> {
    let url = proxy_url(&format!(
        "historial-precios/{}/{}",
        encode_segment(codigo),
        source.resource()
    ));
    match get_json::<ApiListResponse<PriceRecordDto>>(&url).await {
        Ok(response) => Ok(response.data),
        Err(ApiError::Http { status: 404, .. }) => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}
