use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use tracing::{debug, warn};

use drill_core::model::{ConfigMetadata, Difficulty, SessionConfig, SessionConfigDraft};

use crate::error::ConfigSourceError;

/// Supplies the raw runtime configuration document, if there is one.
///
/// Implementations live at the boundary (file, bundled asset, fixture); the
/// core only sees the resulting `SessionConfig`.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Fetch the raw JSON config document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigSourceError` when the document cannot be obtained. The
    /// caller recovers with defaults; this is never fatal.
    async fn fetch(&self) -> Result<String, ConfigSourceError>;
}

//
// ─── DOCUMENT ──────────────────────────────────────────────────────────────────
//

/// The runtime configuration document, all fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigDoc {
    nivel: Option<String>,
    ejercicios: Option<f64>,
    autor: Option<String>,
    version: Option<String>,
    fecha: Option<String>,
    descripcion: Option<String>,
    #[serde(rename = "nombreApp")]
    nombre_app: Option<String>,
    plataformas: Option<Vec<String>>,
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Loads the session configuration, falling back to built-in defaults.
///
/// One attempt per load: absence of the document, a failed fetch, or a parse
/// error all yield the defaults (basic tier, 3 exercises, tier speed) and a
/// log line — never an error the renderer has to handle.
#[derive(Clone)]
pub struct ConfigService {
    source: Option<Arc<dyn ConfigSource>>,
}

impl ConfigService {
    #[must_use]
    pub fn new(source: Arc<dyn ConfigSource>) -> Self {
        Self {
            source: Some(source),
        }
    }

    /// A service with no document source: `load` always yields defaults.
    #[must_use]
    pub fn without_source() -> Self {
        Self { source: None }
    }

    /// Load the session configuration, merging the document over defaults.
    pub async fn load(&self) -> SessionConfig {
        let Some(source) = self.source.as_ref() else {
            debug!("no config source; using defaults");
            return SessionConfig::default();
        };

        let raw = match source.fetch().await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "config document unavailable; using defaults");
                return SessionConfig::default();
            }
        };

        match serde_json::from_str::<ConfigDoc>(&raw) {
            Ok(doc) => config_from_doc(doc),
            Err(err) => {
                warn!(error = %err, "config document is malformed; using defaults");
                SessionConfig::default()
            }
        }
    }
}

fn config_from_doc(doc: ConfigDoc) -> SessionConfig {
    let mut draft = SessionConfigDraft::new();

    if let Some(nivel) = doc.nivel.as_deref() {
        match Difficulty::try_from_name(nivel) {
            Some(tier) => draft.difficulty = Some(tier),
            None => warn!(nivel, "unrecognized difficulty name; using basic"),
        }
    }
    draft.exercise_count = doc.ejercicios;

    draft.metadata = ConfigMetadata {
        author: doc.autor,
        version: doc.version,
        date: doc.fecha.map(|raw| format_long_date(&raw)),
        description: doc.descripcion,
        app_name: doc.nombre_app,
        platforms: doc
            .plataformas
            .unwrap_or_default()
            .iter()
            .map(|p| platform_display_name(p))
            .collect(),
    };

    draft.build()
}

//
// ─── DISPLAY TABLES ────────────────────────────────────────────────────────────
//

const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// Reformat an ISO `YYYY-MM-DD` date as a long Spanish date string,
/// e.g. `2025-10-26` → `26 de Octubre del 2025`.
///
/// Unparseable input passes through unchanged; a bad date is display data,
/// not an error.
#[must_use]
pub fn format_long_date(raw: &str) -> String {
    let Ok(date) = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") else {
        return raw.to_string();
    };
    let month = MONTH_NAMES[date.month0() as usize];
    format!("{} de {} del {}", date.day(), month, date.year())
}

/// Map a platform identifier onto its display name. Unknown identifiers pass
/// through trimmed.
#[must_use]
pub fn platform_display_name(raw: &str) -> String {
    match raw.trim().to_lowercase().as_str() {
        "android" => "Android".to_string(),
        "ios" => "iOS".to_string(),
        "web" => "Web".to_string(),
        "windows" => "Windows".to_string(),
        "linux" => "Linux".to_string(),
        "macos" => "macOS".to_string(),
        _ => raw.trim().to_string(),
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct FixtureSource(Result<String, ConfigSourceError>);

    #[async_trait]
    impl ConfigSource for FixtureSource {
        async fn fetch(&self) -> Result<String, ConfigSourceError> {
            match &self.0 {
                Ok(raw) => Ok(raw.clone()),
                Err(_) => Err(ConfigSourceError::NotFound),
            }
        }
    }

    fn service_with(raw: &str) -> ConfigService {
        ConfigService::new(Arc::new(FixtureSource(Ok(raw.to_string()))))
    }

    #[tokio::test]
    async fn full_document_is_applied() {
        let raw = r#"{
            "nivel": "Avanzado",
            "ejercicios": 2,
            "autor": "Jonathan R.",
            "version": "1.0",
            "fecha": "2025-10-26",
            "descripcion": "Cálculo mental",
            "nombreApp": "STEAM-G",
            "plataformas": ["android", "web", "steamdeck"]
        }"#;

        let config = service_with(raw).load().await;

        assert_eq!(config.difficulty(), Difficulty::Advanced);
        assert_eq!(config.exercise_count(), 2);
        assert_eq!(config.reveal_interval(), Duration::from_millis(600));
        let meta = config.metadata();
        assert_eq!(meta.author.as_deref(), Some("Jonathan R."));
        assert_eq!(meta.date.as_deref(), Some("26 de Octubre del 2025"));
        assert_eq!(meta.app_name.as_deref(), Some("STEAM-G"));
        assert_eq!(
            meta.platforms,
            vec!["Android".to_string(), "Web".into(), "steamdeck".into()]
        );
    }

    #[tokio::test]
    async fn malformed_document_falls_back_to_defaults() {
        let config = service_with("{not json").load().await;
        assert_eq!(config, SessionConfig::default());
    }

    #[tokio::test]
    async fn failed_fetch_falls_back_to_defaults() {
        let service = ConfigService::new(Arc::new(FixtureSource(Err(
            ConfigSourceError::NotFound,
        ))));
        assert_eq!(service.load().await, SessionConfig::default());
    }

    #[tokio::test]
    async fn missing_source_yields_defaults() {
        let config = ConfigService::without_source().load().await;
        assert_eq!(config, SessionConfig::default());
    }

    #[tokio::test]
    async fn unrecognized_difficulty_defaults_to_basic() {
        let config = service_with(r#"{"nivel": "imposible"}"#).load().await;
        assert_eq!(config.difficulty(), Difficulty::Basic);
    }

    #[tokio::test]
    async fn exercise_count_is_clamped() {
        let config = service_with(r#"{"ejercicios": 9}"#).load().await;
        assert_eq!(config.exercise_count(), 5);

        let config = service_with(r#"{"ejercicios": 0.4}"#).load().await;
        assert_eq!(config.exercise_count(), 1);
    }

    #[test]
    fn long_date_formatting() {
        assert_eq!(format_long_date("2025-10-26"), "26 de Octubre del 2025");
        assert_eq!(format_long_date("2024-01-05"), "5 de Enero del 2024");
        assert_eq!(format_long_date("soon"), "soon");
    }

    #[test]
    fn platform_names_map_through_the_table() {
        assert_eq!(platform_display_name("ios"), "iOS");
        assert_eq!(platform_display_name(" MACOS "), "macOS");
        assert_eq!(platform_display_name("amiga"), "amiga");
    }
}
