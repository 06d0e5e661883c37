// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LLMError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limit exceeded")]
    RateLimit,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialisation error: {0}")]
    Serialisation(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Timeout error")]
    Timeout,

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type LLMResult<T> = Result<T, LLMError>;

impl From<serde_json::Error> for LLMError {
    fn from(err: serde_json::Error) -> Self {
        LLMError::Serialisation(err.to_string())
    }
}

impl LLMError {
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LLMError::Network(_) | LLMError::Timeout | LLMError::RateLimit | LLMError::Provider(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(LLMError::Timeout.is_retryable());
        assert!(LLMError::RateLimit.is_retryable());
        assert!(LLMError::Network("reset".to_string()).is_retryable());
        assert!(!LLMError::Authentication("bad key".to_string()).is_retryable());
        assert!(!LLMError::Serialisation("eof".to_string()).is_retryable());
    }

    #[test]
    fn test_json_error_maps_to_serialisation() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert!(matches!(LLMError::from(err), LLMError::Serialisation(_)));
    }
}
