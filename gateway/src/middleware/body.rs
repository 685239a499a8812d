use actix_web::web;
use futures_util::StreamExt;
use serde_json::Value;

use crate::constants::messages;
use crate::error::{GatewayError, Result};

const DEFAULT_LIMIT: usize = 4 * 1024 * 1024;

/// Maximum accepted request body size, registered as app data.
#[derive(Debug, Clone, Copy)]
pub struct BodyLimit(pub usize);

impl Default for BodyLimit {
    fn default() -> Self {
        BodyLimit(DEFAULT_LIMIT)
    }
}

/// Reads the whole request body and parses it as JSON.
pub async fn read_json(mut payload: web::Payload, limit: BodyLimit) -> Result<Value> {
    let mut body = web::BytesMut::new();

    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| {
            GatewayError::validation(format!("Failed to read request body: {}", e))
        })?;

        if body.len() + chunk.len() > limit.0 {
            return Err(GatewayError::PayloadTooLarge(limit.0));
        }
        body.extend_from_slice(&chunk);
    }

    serde_json::from_slice(&body).map_err(|_| GatewayError::validation(messages::INVALID_JSON))
}
