//! Wire types shared by the catalog endpoints

use crate::error::{Error, Result};
use serde::Deserialize;

/// Standard `{success, data, message}` envelope the catalog endpoints wrap
/// their payloads in
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the payload, turning an unsuccessful or empty envelope into
    /// an error
    pub fn into_data(self) -> Result<T> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(Error::Api("response envelope carried no data".to_string())),
            (false, _) => Err(Error::Api(
                self.message
                    .unwrap_or_else(|| "request was not successful".to_string()),
            )),
        }
    }

    /// Check the envelope's verdict, ignoring any payload
    pub fn into_ack(self) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            Err(Error::Api(
                self.message
                    .unwrap_or_else(|| "request was not successful".to_string()),
            ))
        }
    }
}

/// Error body most endpoints answer with on failure
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
