use crate::errors::ApiError;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Payload of a request.
pub enum RequestBody {
    /// Structured value, serialized to JSON text before sending.
    Json(Value),
    /// Pre-encoded text, sent as-is.
    Text(String),
    /// Multipart payload, sent as-is with its own content type.
    Multipart(reqwest::multipart::Form),
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            other => Self::Json(other),
        }
    }
}

#[derive(Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<RequestBody>,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn json(method: Method, body: Value) -> Self {
        Self {
            method,
            body: Some(RequestBody::from(body)),
            ..Self::default()
        }
    }
}

/// Thin JSON client for the HRMS REST backend.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base: Url) -> Self {
        Self::with_client(Client::new(), base)
    }

    pub fn with_client(http: Client, base: Url) -> Self {
        Self { http, base }
    }

    /// Resolves `path` (with optional query string) against the base URL.
    pub fn url_for(&self, path: &str) -> Result<Url, ApiError> {
        let mut base = self.base.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        base.join(path.trim_start_matches('/'))
            .map_err(|err| ApiError::Transport {
                message: format!("invalid request path {path:?}: {err}"),
            })
    }

    /// Sends one request and returns the parsed body.
    ///
    /// A `204` or an unparsable success body yields an empty object.
    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<Value, ApiError> {
        let url = self.url_for(path)?;
        let RequestOptions {
            method,
            headers,
            body,
        } = options;

        debug!(%method, %url, "api request");
        let mut builder = self.http.request(method.clone(), url.clone());
        let is_multipart = matches!(body, Some(RequestBody::Multipart(_)));
        if !is_multipart {
            builder = builder.header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        builder = builder.headers(headers);
        builder = match body {
            Some(RequestBody::Json(value)) => {
                let text = serde_json::to_string(&value).map_err(ApiError::decode)?;
                builder.body(text)
            }
            Some(RequestBody::Text(text)) => builder.body(text),
            Some(RequestBody::Multipart(form)) => builder.multipart(form),
            None => builder,
        };

        let response = builder.send().await.map_err(|err| {
            warn!(%method, %url, error = %err, "api request failed to send");
            ApiError::transport(&err)
        })?;

        let status = response.status();
        let data = if status == StatusCode::NO_CONTENT {
            empty_object()
        } else {
            let bytes = response.bytes().await.map_err(|err| ApiError::transport(&err))?;
            parse_body(&bytes)
        };

        if !status.is_success() {
            let err = ApiError::from_response(status, &data);
            warn!(%method, %url, %status, error = %err, "api request rejected");
            return Err(err);
        }

        Ok(data)
    }

    pub(crate) async fn request_as<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let value = self.request(path, options).await?;
        serde_json::from_value(value).map_err(ApiError::decode)
    }

    /// Like [`request_as`](Self::request_as) for collections: a body that is
    /// not an array (the empty-object fallback) reads as an empty list.
    pub(crate) async fn request_list<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Vec<T>, ApiError> {
        match self.request(path, RequestOptions::new(Method::GET)).await? {
            Value::Array(items) => items
                .into_iter()
                .map(serde_json::from_value)
                .collect::<Result<Vec<T>, _>>()
                .map_err(ApiError::decode),
            other => {
                debug!(body = %other, "non-array list body treated as empty");
                Ok(Vec::new())
            }
        }
    }
}

fn parse_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap_or_else(|_| empty_object())
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// Appends `params` as a query string, omitting it when there are none.
pub fn with_query(path: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();
    format!("{path}?{query}")
}
