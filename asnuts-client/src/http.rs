//! HTTP client for network-based API calls

use async_trait::async_trait;
use reqwest::{Client, IntoUrl, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use shared::client::{
    AuthResponse, HealthResponse, LoginRequest, MessageResponse, OrderResponse, ProductResponse,
    RegisterRequest,
};
use shared::error::ApiResponse;
use shared::models::{
    Order, OrderCreate, OrderStatus, OrderStatusUpdate, Product, ProductCreate, ProductUpdate,
};

use crate::{ClientConfig, ClientError, ClientResult, StorefrontApi};

/// HTTP client for making network requests to the storefront server
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `path` followed by `segments`, each percent-encoded as one path segment
    fn segment_url(&self, path: &str, segments: &[&str]) -> ClientResult<Url> {
        let mut url = Url::parse(&self.url(path))
            .map_err(|e| ClientError::Validation(format!("Invalid server URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::Validation("Server URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Attach the bearer token when one is set
    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.authorized(self.client.get(self.url(path)));
        Self::handle_response(request.send().await?).await
    }

    pub async fn post<T: DeserializeOwned, B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.authorized(self.client.post(self.url(path)).json(body));
        Self::handle_response(request.send().await?).await
    }

    pub async fn put<T: DeserializeOwned, B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.put_url(self.url(path), body).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.delete_url(self.url(path)).await
    }

    async fn put_url<T: DeserializeOwned, B: serde::Serialize + ?Sized>(
        &self,
        url: impl IntoUrl,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.authorized(self.client.put(url).json(body));
        Self::handle_response(request.send().await?).await
    }

    async fn delete_url<T: DeserializeOwned>(&self, url: impl IntoUrl) -> ClientResult<T> {
        let request = self.authorized(self.client.delete(url));
        Self::handle_response(request.send().await?).await
    }

    /// Handle the HTTP response
    ///
    /// Error bodies are `ApiResponse<()>`; a body that does not parse keeps
    /// its raw text as the message.
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            let (code, message) = match serde_json::from_str::<ApiResponse<()>>(&text) {
                Ok(body) => (body.code.unwrap_or(0), body.message),
                Err(_) => (0, text),
            };
            return Err(match status {
                StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
                StatusCode::FORBIDDEN => ClientError::Forbidden(message),
                StatusCode::NOT_FOUND => ClientError::NotFound(message),
                StatusCode::BAD_REQUEST => ClientError::Validation(message),
                _ => ClientError::Api {
                    status: status.as_u16(),
                    code,
                    message,
                },
            });
        }

        response.json().await.map_err(Into::into)
    }

    // ========== Health / Auth API ==========

    pub async fn health(&self) -> ClientResult<HealthResponse> {
        self.get("/health").await
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> ClientResult<AuthResponse> {
        let request = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post("/api/register", &request).await
    }
}

#[async_trait]
impl StorefrontApi for HttpClient {
    fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    async fn login(&self, email: &str, password: &str) -> ClientResult<AuthResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post("/api/login", &request).await
    }

    // ========== Product API ==========

    async fn list_products(&self) -> ClientResult<Vec<Product>> {
        self.get("/api/products").await
    }

    async fn create_product(&self, product: &ProductCreate) -> ClientResult<ProductResponse> {
        self.post("/api/products", product).await
    }

    async fn update_product(
        &self,
        id: &str,
        changes: &ProductUpdate,
    ) -> ClientResult<ProductResponse> {
        let url = self.segment_url("/api/products", &[id])?;
        self.put_url(url, changes).await
    }

    async fn delete_product(&self, id: &str) -> ClientResult<MessageResponse> {
        let url = self.segment_url("/api/products", &[id])?;
        self.delete_url(url).await
    }

    // ========== Order API ==========

    async fn create_order(&self, order: &OrderCreate) -> ClientResult<OrderResponse> {
        self.post("/api/orders", order).await
    }

    async fn list_orders(&self) -> ClientResult<Vec<Order>> {
        self.get("/api/orders").await
    }

    async fn update_order_status(
        &self,
        id: i64,
        status: OrderStatus,
    ) -> ClientResult<OrderResponse> {
        self.put(&format!("/api/orders/{id}/status"), &OrderStatusUpdate { status })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let client = HttpClient::new(&ClientConfig::new("http://localhost:3000/")).unwrap();
        assert_eq!(client.url("/api/products"), "http://localhost:3000/api/products");
        assert_eq!(client.url("health"), "http://localhost:3000/health");
        assert!(client.token().is_none());
        assert_eq!(client.with_token("abc").token(), Some("abc"));
    }

    #[test]
    fn test_product_id_is_one_encoded_segment() {
        let client = HttpClient::new(&ClientConfig::new("http://localhost:3000")).unwrap();
        let url = client.segment_url("/api/products", &["w-180"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/products/w-180");

        let url = client
            .segment_url("/api/products", &["hazel/nuts?x=1#top"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/api/products/hazel%2Fnuts%3Fx=1%23top"
        );
        assert_eq!(url.path_segments().unwrap().count(), 3);
    }
}
