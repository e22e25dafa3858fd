//! Client configuration

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_SUPPORT_PHONE: &str = "+91 9840694616";
pub const DEFAULT_SHOP_NAME: &str = "AS Nuts";

/// Client configuration for connecting to the storefront server
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:3000")
    pub base_url: String,

    /// JWT token for authentication
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Shown to customers when an order cannot be submitted
    pub support_phone: String,

    pub shop_name: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
            support_phone: DEFAULT_SUPPORT_PHONE.to_string(),
            shop_name: DEFAULT_SHOP_NAME.to_string(),
        }
    }

    /// Set the JWT token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    pub fn with_support_phone(mut self, phone: impl Into<String>) -> Self {
        self.support_phone = phone.into();
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::HttpClient> {
        crate::HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
