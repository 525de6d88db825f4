#[derive(Clone)]
pub struct AppConfig {
    /// Shop domain, e.g. `my-store.myshopify.com`. A `https://` prefix is
    /// accepted and stripped by the client.
    pub shop_domain: String,
    /// Admin API access token.
    pub access_token: String,
    /// Admin API version segment, e.g. `2025-10`.
    pub api_version: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("shop_domain", &self.shop_domain)
            .field("access_token", &"[redacted]")
            .field("api_version", &self.api_version)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("log_level", &self.log_level)
            .finish()
    }
}
