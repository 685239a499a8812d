use actix_web::{HttpRequest, HttpResponse};

use crate::constants::messages;
use crate::error::{GatewayError, Result};
use crate::middleware::authorize;

/// Default service. Unknown routes still pass the secret and collection
/// gates before answering 404.
pub async fn route_not_found(req: HttpRequest) -> Result<HttpResponse> {
    authorize(&req).await?;
    Err(GatewayError::NotFound(messages::ROUTE_NOT_FOUND.to_string()))
}
