use async_trait::async_trait;

use super::{HttpError, HttpErrorKind, HttpExecutor, HttpRequest, HttpResponse, Method};

/// Executes requests over the network with a shared `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct ReqwestExecutor {
    client: reqwest::Client,
}

impl ReqwestExecutor {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HttpExecutor for ReqwestExecutor {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let HttpRequest {
            method,
            url,
            headers,
            data,
        } = request;

        let mut builder = self.client.request(method.into(), &url);
        for (name, value) in headers.into_iter().flatten() {
            builder = builder.header(name, value);
        }
        let builder = match data {
            Some(body) => builder.body(body),
            None => builder,
        };

        let response = builder.send().await?;
        into_response(response).await
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
            Method::Patch => Self::PATCH,
            Method::Head => Self::HEAD,
            Method::Options => Self::OPTIONS,
        }
    }
}

async fn into_response(response: reqwest::Response) -> Result<HttpResponse, HttpError> {
    let status = response.status().as_u16();
    let headers: Vec<(String, String)> = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            let value = value.to_str().ok()?;
            Some((name.as_str().to_string(), value.to_string()))
        })
        .collect();

    let body = response.bytes().await.map_err(|e| HttpError {
        kind: HttpErrorKind::BadResponse,
        status: Some(status),
        message: format!("failed to read response body: {e}"),
    })?;

    Ok(HttpResponse {
        status,
        headers: Some(headers),
        data: Some(body.to_vec()),
    })
}

impl From<reqwest::Error> for HttpError {
    fn from(error: reqwest::Error) -> Self {
        let kind = if error.is_timeout() {
            HttpErrorKind::Timeout
        } else if error.is_connect() {
            HttpErrorKind::Connection
        } else {
            HttpErrorKind::BadResponse
        };
        Self {
            kind,
            status: error.status().map(|status| status.as_u16()),
            message: error.to_string(),
        }
    }
}
