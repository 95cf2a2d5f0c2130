use crate::listing::JobSource;

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub http_timeout_secs: u64,
    pub user_agent: String,
    /// Sources queried when the caller does not name any.
    pub enabled_sources: Vec<JobSource>,
    pub remoteok_base_url: String,
    pub remotive_base_url: String,
    pub arbeitnow_base_url: String,
    pub remotive_limit: u32,
    pub popular_tags_limit: usize,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("enabled_sources", &self.enabled_sources)
            .field("remoteok_base_url", &self.remoteok_base_url)
            .field("remotive_base_url", &self.remotive_base_url)
            .field("arbeitnow_base_url", &self.arbeitnow_base_url)
            .field("remotive_limit", &self.remotive_limit)
            .field("popular_tags_limit", &self.popular_tags_limit)
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .finish()
    }
}
