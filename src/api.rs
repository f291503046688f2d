// API client module: a small blocking HTTP client for the Reflect API.
// Calls are made one at a time; the import never has two requests in
// flight.

use crate::error::{ImportError, Result};
use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://reflect.app/api";
pub const DEFAULT_LIST_NAME: &str = "Imported";
pub const LIST_APPEND: &str = "list-append";

/// A graph as returned by `GET /graphs`. Only `id` is required.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Body of `PUT /graphs/{id}/daily-notes`: append `text` to the list
/// `list_name` inside the daily note for `date`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ImportRequest {
    pub date: String,
    pub text: String,
    pub transform_type: String,
    pub list_name: String,
}

impl ImportRequest {
    pub fn list_append(date: &str, text: String, list_name: &str) -> Self {
        ImportRequest {
            date: date.to_string(),
            text,
            transform_type: LIST_APPEND.to_string(),
            list_name: list_name.to_string(),
        }
    }
}

/// Status line of a response, without the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiStatus {
    pub code: u16,
    pub text: String,
}

impl ApiStatus {
    pub fn is_ok(&self) -> bool {
        self.code == 200
    }
}

impl From<StatusCode> for ApiStatus {
    fn from(status: StatusCode) -> Self {
        ApiStatus {
            code: status.as_u16(),
            text: status.canonical_reason().unwrap_or("").to_string(),
        }
    }
}

/// The remote calls the import pipeline needs.
pub trait ReflectApi {
    /// List the graphs the token can access. A non-200 answer is
    /// [`ImportError::GraphListing`].
    fn list_graphs(&self) -> Result<Vec<Graph>>;

    /// Submit one append request. The status is returned as is; deciding
    /// what a non-200 means is up to the caller.
    fn append_daily_note(&self, graph_id: &str, req: &ImportRequest) -> Result<ApiStatus>;
}

/// Blocking reqwest client bound to one API root and one bearer token.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    /// `base_url` is the API root, e.g. [`DEFAULT_BASE_URL`].
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(ImportError::InvalidInput("API token is required".into()));
        }
        let client = Client::builder().build()?;
        Ok(ApiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn auth_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let val = HeaderValue::from_str(&format!("Bearer {}", self.token)).map_err(|_| {
            ImportError::InvalidInput("API token contains invalid header characters".into())
        })?;
        headers.insert(AUTHORIZATION, val);
        Ok(headers)
    }
}

impl ReflectApi for ApiClient {
    fn list_graphs(&self) -> Result<Vec<Graph>> {
        let url = format!("{}/graphs", self.base_url);
        debug!("GET {}", url);
        let res = self.client.get(&url).headers(self.auth_headers()?).send()?;
        let status = ApiStatus::from(res.status());
        debug!("graph listing answered {}", status.code);
        if !status.is_ok() {
            return Err(ImportError::GraphListing {
                status: status.code,
                status_text: status.text,
            });
        }
        let graphs: Vec<Graph> = res.json()?;
        Ok(graphs)
    }

    fn append_daily_note(&self, graph_id: &str, req: &ImportRequest) -> Result<ApiStatus> {
        let url = format!("{}/graphs/{}/daily-notes", self.base_url, graph_id);
        debug!("PUT {} ({})", url, req.date);
        // `.json()` also sets `Content-Type: application/json`
        let res = self
            .client
            .put(&url)
            .headers(self.auth_headers()?)
            .json(req)
            .send()?;
        Ok(ApiStatus::from(res.status()))
    }
}
