use std::future::Future;
use std::pin::Pin;

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};

use crate::auth::SecretValidator;
use crate::constants::SECRET_HEADER;
use crate::db::DocumentStore;
use crate::error::{GatewayError, Result};

/// Proof that a request passed the shared-secret check and that the bound
/// collection exists. Handlers take it as their first argument.
pub struct Gated {
    store: web::Data<dyn DocumentStore>,
}

impl Gated {
    pub fn store(&self) -> &dyn DocumentStore {
        self.store.get_ref()
    }
}

/// Runs the pre-route gates: the secret is checked before the store is
/// touched, then the connection is established and the collection looked up.
pub async fn authorize(req: &HttpRequest) -> Result<Gated> {
    let validator = req
        .app_data::<web::Data<SecretValidator>>()
        .ok_or_else(|| GatewayError::Internal("Secret validator not available".to_string()))?;

    let presented = req
        .headers()
        .get(SECRET_HEADER)
        .and_then(|value| value.to_str().ok());

    if !validator.is_valid_request(presented) {
        log::warn!(
            "Rejected {} {}: missing or invalid secret",
            req.method(),
            req.path()
        );
        return Err(GatewayError::Unauthorized);
    }

    let store = req
        .app_data::<web::Data<dyn DocumentStore>>()
        .cloned()
        .ok_or_else(|| GatewayError::Internal("Document store not available".to_string()))?;

    store.ensure_connected().await?;

    if !store.collection_exists().await? {
        log::warn!("Collection '{}' does not exist", store.collection_name());
        return Err(GatewayError::CollectionMissing(
            store.collection_name().to_string(),
        ));
    }

    Ok(Gated { store })
}

impl FromRequest for Gated {
    type Error = GatewayError;
    type Future = Pin<Box<dyn Future<Output = Result<Self>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move { authorize(&req).await })
    }
}
