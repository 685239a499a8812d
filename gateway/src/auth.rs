/// Checks the shared secret presented by callers.
#[derive(Debug, Clone)]
pub struct SecretValidator {
    secret: String,
}

impl SecretValidator {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn is_valid_request(&self, presented: Option<&str>) -> bool {
        presented.is_some_and(|value| value == self.secret)
    }
}
