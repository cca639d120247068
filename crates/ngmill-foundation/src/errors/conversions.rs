//! From implementations for standard library types

use crate::NgError;

impl From<std::string::FromUtf8Error> for NgError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        NgError::Emit {
            message: format!("Emitted code is not valid UTF-8: {}", err),
        }
    }
}
