use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

/// Вкладки приложения
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPage {
    #[default]
    Cotizacion,
    HistorialPrecios,
}

impl AppPage {
    pub fn key(&self) -> &'static str {
        match self {
            AppPage::Cotizacion => "cotizacion",
            AppPage::HistorialPrecios => "historial",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AppPage::Cotizacion => "Cotización",
            AppPage::HistorialPrecios => "Historial de precios",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().into_iter().find(|p| p.key() == key)
    }

    pub fn all() -> [AppPage; 2] {
        [AppPage::Cotizacion, AppPage::HistorialPrecios]
    }
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub active: RwSignal<AppPage>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(AppPage::default()),
        }
    }

    pub fn activate(&self, page: AppPage) {
        self.active.set(page);
    }

    /// Синхронизация активной вкладки с `?vista=` в адресной строке
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let params: HashMap<String, String> =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        if let Some(page) = params.get("vista").and_then(|k| AppPage::from_key(k)) {
            self.active.set(page);
        }

        let this = *self;
        Effect::new(move |_| {
            let query_string = serde_qs::to_string(&HashMap::from([(
                "vista".to_string(),
                this.active.get().key().to_string(),
            )]))
            .unwrap_or_default();
            let new_url = format!("?{}", query_string);

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();

            // Only update URL if it actually changed
            if current_search != new_url {
                if let Some(history) = window().and_then(|w| w.history().ok()) {
                    let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&new_url));
                }
            }
        });
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}
