//! Сбор двух параллельных загрузок истории цен в одно состояние поиска

use contracts::projections::p900_price_history::dto::PriceRecordDto;
use contracts::projections::p900_price_history::series::{build_history, LookupState};

use crate::shared::api_utils::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSource {
    /// Precio registrado en almacén
    Almacen,
    /// Costo en órdenes de compra
    OrdenCompra,
}

impl PriceSource {
    pub fn resource(&self) -> &'static str {
        match self {
            PriceSource::Almacen => "almacen",
            PriceSource::OrdenCompra => "orden-compra",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriceSource::Almacen => "Precio almacén",
            PriceSource::OrdenCompra => "Costo orden de compra",
        }
    }
}

type SourceResult = Result<Vec<PriceRecordDto>, ApiError>;

/// Results of the two requests of one search, in whatever order they land
#[derive(Debug, Default)]
pub struct PairedFetch {
    codigo: String,
    almacen: Option<SourceResult>,
    orden_compra: Option<SourceResult>,
}

impl PairedFetch {
    pub fn new(codigo: &str) -> Self {
        Self {
            codigo: codigo.to_string(),
            ..Self::default()
        }
    }

    /// Stores one result; returns the final state once both have arrived.
    ///
    /// Any transport error fails the whole search, both empty is `Empty`.
    pub fn record(&mut self, source: PriceSource, result: SourceResult) -> Option<LookupState> {
        match source {
            PriceSource::Almacen => self.almacen = Some(result),
            PriceSource::OrdenCompra => self.orden_compra = Some(result),
        }

        let (Some(almacen), Some(orden_compra)) = (&self.almacen, &self.orden_compra) else {
            return None;
        };
        let state = match (almacen, orden_compra) {
            (Ok(almacen), Ok(orden_compra)) => {
                LookupState::resolve(&self.codigo, build_history(&self.codigo, almacen, orden_compra))
            }
            (Err(e), _) | (_, Err(e)) => LookupState::fail(&self.codigo, e.to_string()),
        };
        Some(state)
    }
}
