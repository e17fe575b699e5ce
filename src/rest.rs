//! HTTP implementation of the game service.
//!
//! Thin JSON/REST plumbing over `reqwest`. The only logic here is failure
//! classification: HTTP statuses and the server's body `code` map onto the
//! [`ServiceError`] taxonomy so the store can recover uniformly.

use crate::error::ServiceError;
use crate::model::{Game, GamesOverview, Move};
use crate::service::GameService;
use crate::session::SessionStore;
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

/// Error body returned by the server on failed requests.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<String>,
}

/// Game service over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct RestGameService {
    base_url: String,
    client: reqwest::Client,
    session: SessionStore,
}

impl RestGameService {
    /// Creates a client against `base_url`, presenting credentials from
    /// `session` on every request.
    pub fn new(base_url: impl Into<String>, session: SessionStore) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.token() {
            Some(token) => req.header(reqwest::header::AUTHORIZATION, token),
            None => req,
        }
    }

    /// Deserializes a success body or classifies the failure.
    async fn handle<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ServiceError> {
        if response.status().is_success() {
            return Ok(response.json().await?);
        }
        Err(Self::classify(response).await)
    }

    /// Maps a failed response onto the error taxonomy using the HTTP
    /// status and the server's body `code`.
    async fn classify(response: reqwest::Response) -> ServiceError {
        let status = response.status().as_u16();
        let code = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|b| b.code)
            .unwrap_or_else(|| "unknown".to_string());

        warn!(status, code = %code, "request failed");
        ServiceError::from_status(status, &code)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ServiceError> {
        let response = self.authorize(self.client.get(self.url(path))).send().await?;
        self.handle(response).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, ServiceError> {
        let response = self
            .authorize(self.client.post(self.url(path)))
            .json(body)
            .send()
            .await?;
        self.handle(response).await
    }
}

#[async_trait]
impl GameService for RestGameService {
    #[instrument(skip(self))]
    async fn list_games(&self) -> Result<GamesOverview, ServiceError> {
        debug!("listing games");
        self.get("/games").await
    }

    #[instrument(skip(self))]
    async fn load_game(&self, id: &str) -> Result<Option<Game>, ServiceError> {
        debug!("loading game");
        match self.get(&format!("/games/{id}")).await {
            Ok(game) => Ok(Some(game)),
            // A vanished game is an expected outcome of a load, not a failure.
            Err(ServiceError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self))]
    async fn create_game(&self) -> Result<Game, ServiceError> {
        debug!("creating game");
        self.post("/games", &serde_json::json!({})).await
    }

    #[instrument(skip(self))]
    async fn delete_game(&self, id: &str) -> Result<(), ServiceError> {
        debug!("deleting game");
        let response = self
            .authorize(self.client.delete(self.url(&format!("/games/{id}"))))
            .send()
            .await?;
        if response.status().is_success() {
            return Ok(());
        }
        Err(Self::classify(response).await)
    }

    #[instrument(skip(self, mv), fields(from = ?mv.from, to = ?mv.to, version = mv.version))]
    async fn submit_move(&self, id: &str, mv: Move) -> Result<Game, ServiceError> {
        debug!("submitting move");
        let body = serde_json::to_value(mv)
            .map_err(|e| ServiceError::Unknown(e.to_string()))?;
        self.post(&format!("/games/{id}/moves"), &body).await
    }
}
