/// Configuration for the dashboard backend client, loaded from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub base_url: String, // e.g., http://127.0.0.1:5000
    pub property_type: String,
    pub request_timeout_ms: u64,
    pub user_agent: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var("BURBS_BASE_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "http://127.0.0.1:5000".to_string()),
            property_type: std::env::var("BURBS_PROPERTY_TYPE")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "house".to_string()),
            request_timeout_ms: std::env::var("BURBS_REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(30_000),
            user_agent: "burbs-dashboard/0.1".to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Absolute URL for an API path such as `/api/data`
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
