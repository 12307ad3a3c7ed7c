use thiserror::Error;

/// Error payload from the payment boundary, surfaced verbatim to the user
/// and never retried.
#[derive(Debug, Clone, Error)]
#[error("{error}: {message}")]
pub struct CheckoutError {
    pub error: String,
    pub message: String,
}

/// Opaque checkout collaborator: given an optional receipt address, either a
/// redirect destination comes back or an error payload does. Nothing else is
/// assumed about the provider.
pub trait CheckoutGateway {
    fn create_session(&self, email: Option<&str>) -> Result<String, CheckoutError>;
}

/// Checkout configured entirely through the environment; the hosted checkout
/// page itself lives with the payment provider.
pub struct EnvCheckoutGateway;

pub const CHECKOUT_URL_VAR: &str = "HOTDISH_CHECKOUT_URL";

impl CheckoutGateway for EnvCheckoutGateway {
    fn create_session(&self, email: Option<&str>) -> Result<String, CheckoutError> {
        let base = std::env::var(CHECKOUT_URL_VAR).map_err(|_| CheckoutError {
            error: "checkout_error".to_string(),
            message: format!("Missing {CHECKOUT_URL_VAR}"),
        })?;

        match email.map(str::trim).filter(|e| !e.is_empty()) {
            Some(email) => {
                let sep = if base.contains('?') { '&' } else { '?' };
                Ok(format!("{base}{sep}email={email}"))
            }
            None => Ok(base),
        }
    }
}
