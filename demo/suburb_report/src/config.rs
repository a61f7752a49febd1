use std::fs;
use std::path::{Path, PathBuf};

use burbs_core::{DashboardConfig, ModuleKind};

/// Configuration for the suburb report demo
#[derive(Clone, Debug)]
pub struct ReportConfig {
    pub client: DashboardConfig,
    pub suburb: String,
    pub modules: Vec<ModuleKind>,
    /// Questions put to the assistant after the data is loaded
    pub questions: Vec<String>,
    /// Where the listing CSV is written; `None` skips the export
    pub export_dir: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            client: DashboardConfig::default(),
            suburb: std::env::var("SUBURB_REPORT_SUBURB")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "Bondi".to_string()),
            modules: ModuleKind::ALL.to_vec(),
            questions: Vec::new(),
            export_dir: Some(PathBuf::from(".")),
        }
    }
}

impl ReportConfig {
    /// Load configuration from a TOML file (path via SUBURB_REPORT_CONFIG or ./suburb_report.toml),
    /// overlaying values onto env-driven defaults.
    pub fn load() -> Self {
        let default = Self::default();
        let path =
            std::env::var("SUBURB_REPORT_CONFIG").unwrap_or_else(|_| "suburb_report.toml".into());
        let p = Path::new(&path);
        if !p.exists() {
            tracing::info!(target: "suburb_report", path = %path, "No TOML config found; using defaults/env");
            return default;
        }
        match fs::read_to_string(p) {
            Ok(s) => Self::from_toml_str(&s, default),
            Err(e) => {
                tracing::warn!(target: "suburb_report", error = %e, "Failed to read TOML; using defaults");
                default
            }
        }
    }

    pub fn from_toml_str(s: &str, default: Self) -> Self {
        match toml::from_str::<ReportToml>(s) {
            Ok(t) => t.overlay(default),
            Err(e) => {
                tracing::warn!(target: "suburb_report", error = %e, "Failed to parse TOML; using defaults");
                default
            }
        }
    }
}

// =========================
// TOML overlay definitions
// =========================

#[derive(Debug, Clone, Default, serde::Deserialize)]
struct ReportToml {
    pub suburb: Option<String>,
    pub modules: Option<Vec<String>>,
    pub questions: Option<Vec<String>>,
    pub export_dir: Option<String>,
    pub client: Option<ClientToml>,
}

impl ReportToml {
    fn overlay(self, mut base: ReportConfig) -> ReportConfig {
        if let Some(s) = self.suburb {
            base.suburb = s;
        }
        if let Some(names) = self.modules {
            base.modules = names
                .iter()
                .filter_map(|name| match name.parse::<ModuleKind>() {
                    Ok(kind) => Some(kind),
                    Err(e) => {
                        tracing::warn!(target: "suburb_report", error = %e, "Skipping module");
                        None
                    }
                })
                .collect();
        }
        if let Some(q) = self.questions {
            base.questions = q;
        }
        if let Some(dir) = self.export_dir {
            // empty string disables the export
            base.export_dir = Some(PathBuf::from(dir)).filter(|d| !d.as_os_str().is_empty());
        }
        if let Some(c) = self.client {
            c.apply(&mut base.client);
        }
        base
    }
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
struct ClientToml {
    pub base_url: Option<String>,
    pub property_type: Option<String>,
    pub request_timeout_ms: Option<u64>,
}

impl ClientToml {
    fn apply(self, c: &mut DashboardConfig) {
        if let Some(x) = self.base_url {
            c.base_url = x;
        }
        if let Some(x) = self.property_type {
            c.property_type = x;
        }
        if let Some(x) = self.request_timeout_ms {
            c.request_timeout_ms = x;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_replaces_only_given_fields() {
        let base = ReportConfig::default();
        let base_url = base.client.base_url.clone();
        let cfg = ReportConfig::from_toml_str(
            r#"
            suburb = "Manly"
            modules = ["properties", "weather", "schools"]
            questions = ["Is Manly family friendly?"]

            [client]
            property_type = "unit"
            "#,
            base,
        );
        assert_eq!(cfg.suburb, "Manly");
        assert_eq!(cfg.modules, vec![ModuleKind::Properties, ModuleKind::Schools]);
        assert_eq!(cfg.questions.len(), 1);
        assert_eq!(cfg.client.property_type, "unit");
        assert_eq!(cfg.client.base_url, base_url);
        assert_eq!(cfg.export_dir, Some(PathBuf::from(".")));
    }

    #[test]
    fn empty_export_dir_disables_export() {
        let cfg = ReportConfig::from_toml_str(r#"export_dir = """#, ReportConfig::default());
        assert_eq!(cfg.export_dir, None);
    }

    #[test]
    fn invalid_toml_keeps_defaults() {
        let cfg = ReportConfig::from_toml_str("suburb = [", ReportConfig::default());
        assert_eq!(cfg.modules, ModuleKind::ALL.to_vec());
    }
}
