use async_trait::async_trait;

use super::{HttpError, HttpRequest, HttpResponse};

#[async_trait]
pub trait HttpExecutor: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}
