//! REST client for the ludoteca backend
//!
//! Request building and response decoding are plain functions so the wire
//! format can be checked without a server; [`HttpBackend`] only adds the
//! reqwest transport on top.

use crate::error::{map_status_error, ApiError};
use crate::model::{Author, Category, Client, Game, Loan, Mutation, Page, QueryData, QueryKey};
use reqwest::blocking::Client as HttpClient;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;

const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Backend operations used by the app. Implemented over HTTP in production
/// and in memory in tests.
pub trait LudotecaApi: Send + Sync {
    /// Perform a read
    fn fetch(&self, key: &QueryKey) -> Result<QueryData, ApiError>;

    /// Perform a create, update or delete
    fn mutate(&self, mutation: &Mutation) -> Result<(), ApiError>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// Request description
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// Transport-independent description of one backend call
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Path relative to the backend origin, without a leading slash
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<Value>,
}

impl HttpRequest {
    fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }
}

/// Build the request for a read
pub fn query_request(key: &QueryKey) -> HttpRequest {
    match key {
        QueryKey::Categories => HttpRequest::get("category"),
        QueryKey::Clients => HttpRequest::get("client"),
        QueryKey::AllAuthors => HttpRequest::get("author"),
        QueryKey::AllGames => HttpRequest::get("game"),
        QueryKey::Games(filter) => HttpRequest {
            query: filter.query_params(),
            ..HttpRequest::get("game")
        },
        QueryKey::AuthorsPage(page) => HttpRequest {
            method: HttpMethod::Post,
            path: "author".to_string(),
            query: Vec::new(),
            body: Some(json!({ "pageable": page })),
        },
        QueryKey::Loans(query) => HttpRequest {
            method: HttpMethod::Post,
            path: "loan".to_string(),
            query: query.filter.query_params(),
            body: Some(json!({ "pageable": query.page })),
        },
    }
}

/// Build the request for a mutation. Saves with an empty id create, others
/// update in place.
pub fn mutation_request(mutation: &Mutation) -> Result<HttpRequest, ApiError> {
    let resource = mutation.resource();
    if let Mutation::Delete { id, .. } = mutation {
        return Ok(HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/{}", resource.path(), id),
            query: Vec::new(),
            body: None,
        });
    }

    let body = match mutation {
        Mutation::SaveCategory(c) => serde_json::to_value(c),
        Mutation::SaveAuthor(a) => serde_json::to_value(a),
        Mutation::SaveGame(g) => serde_json::to_value(g),
        Mutation::SaveClient(c) => serde_json::to_value(c),
        Mutation::SaveLoan(l) => serde_json::to_value(l),
        Mutation::Delete { .. } => Ok(Value::Null),
    }
    .map_err(|e| ApiError::Decode(e.to_string()))?;

    let id = mutation.record_id();
    let path = if id.is_empty() {
        resource.path().to_string()
    } else {
        format!("{}/{}", resource.path(), id)
    };

    Ok(HttpRequest {
        method: HttpMethod::Put,
        path,
        query: Vec::new(),
        body: Some(body),
    })
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Decode a read response into the data variant matching its key
pub fn decode_query(key: &QueryKey, body: &[u8]) -> Result<QueryData, ApiError> {
    Ok(match key {
        QueryKey::Categories => QueryData::Categories(decode::<Vec<Category>>(body)?),
        QueryKey::Clients => QueryData::Clients(decode::<Vec<Client>>(body)?),
        QueryKey::AllAuthors => QueryData::Authors(decode::<Vec<Author>>(body)?),
        QueryKey::AuthorsPage(_) => QueryData::AuthorPage(decode::<Page<Author>>(body)?),
        QueryKey::AllGames | QueryKey::Games(_) => QueryData::Games(decode::<Vec<Game>>(body)?),
        QueryKey::Loans(_) => QueryData::LoanPage(decode::<Page<Loan>>(body)?),
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// HTTP transport
// ═══════════════════════════════════════════════════════════════════════════════

/// Blocking reqwest client bound to one backend origin
pub struct HttpBackend {
    client: HttpClient,
    base_url: String,
}

impl HttpBackend {
    /// Build a backend client with an explicit request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(map_transport_error)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[cfg(test)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn execute(&self, request: &HttpRequest) -> Result<Vec<u8>, ApiError> {
        let url = self.url(&request.path);
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            let bytes = serde_json::to_vec(body).map_err(|e| ApiError::Decode(e.to_string()))?;
            builder = builder.header(CONTENT_TYPE, JSON_CONTENT_TYPE).body(bytes);
        }

        tracing::debug!(method = ?request.method, url = %url, "sending request");
        let response = builder.send().map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().map_err(map_transport_error)?;
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), url = %url, "backend returned an error status");
            return Err(map_status_error(status.as_u16(), &body));
        }
        Ok(body.to_vec())
    }
}

impl LudotecaApi for HttpBackend {
    fn fetch(&self, key: &QueryKey) -> Result<QueryData, ApiError> {
        let body = self.execute(&query_request(key))?;
        decode_query(key, &body)
    }

    fn mutate(&self, mutation: &Mutation) -> Result<(), ApiError> {
        let request = mutation_request(mutation)?;
        self.execute(&request).map(|_| ())
    }
}

fn map_transport_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::Timeout(error.to_string())
    } else {
        ApiError::Transport(error.to_string())
    }
}
