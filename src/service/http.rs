//! REST client for the Rubro backend

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::RubroService;
use crate::config::Config;
use crate::errors::ServiceError;
use crate::models::Rubro;

const RUBROS_PATH: &str = "rubros";

/// `RubroService` backed by a conventional REST resource at `{base}/rubros`
#[derive(Debug, Clone)]
pub struct HttpRubroService {
    client: Client,
    base_url: String,
}

impl HttpRubroService {
    pub fn new(config: &Config) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .user_agent(config.http.user_agent.clone())
            .timeout(config.http_timeout())
            .build()?;

        Ok(Self::with_client(client, &config.api_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, RUBROS_PATH)
    }

    pub fn item_url(&self, id: u64) -> String {
        format!("{}/{}/{}", self.base_url, RUBROS_PATH, id)
    }
}

/// Turn a non-2xx response into a `ServiceError::Status` carrying the body
async fn check_status(response: Response) -> Result<Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .text()
        .await
        .unwrap_or_default()
        .trim()
        .to_string();
    let message = if message.is_empty() {
        status.canonical_reason().unwrap_or("unknown error").to_string()
    } else {
        message
    };

    Err(ServiceError::Status {
        status_code: status.as_u16(),
        message,
    })
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ServiceError> {
    let response = check_status(response).await?;
    Ok(response.json::<T>().await?)
}

#[async_trait]
impl RubroService for HttpRubroService {
    async fn list(&self) -> Result<Vec<Rubro>, ServiceError> {
        let url = self.collection_url();
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        let rubros: Vec<Rubro> = read_json(response).await?;
        debug!("Fetched {} rubros", rubros.len());
        Ok(rubros)
    }

    async fn create(&self, rubro: &Rubro) -> Result<Rubro, ServiceError> {
        let url = self.collection_url();
        debug!("POST {}", url);
        let response = self.client.post(&url).json(rubro).send().await?;
        let created: Rubro = read_json(response).await?;
        info!("Created rubro {} ({})", created.id, created.denominacion);
        Ok(created)
    }

    async fn update(&self, id: u64, rubro: &Rubro) -> Result<Rubro, ServiceError> {
        let url = self.item_url(id);
        debug!("PUT {}", url);
        let response = self.client.put(&url).json(rubro).send().await?;
        let updated: Rubro = read_json(response).await?;
        info!("Updated rubro {}", id);
        Ok(updated)
    }

    async fn delete(&self, id: u64) -> Result<(), ServiceError> {
        let url = self.item_url(id);
        debug!("DELETE {}", url);
        let response = self.client.delete(&url).send().await?;
        check_status(response).await?;
        info!("Deleted rubro {}", id);
        Ok(())
    }
}
