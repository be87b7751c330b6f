// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Service configuration
//!
//! Precedence, lowest first: built-in defaults, the optional TOML file, then
//! CLI flags / environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classifier::ClassifierKind;
use crate::cli::Cli;
use crate::vision::{CollaboratorConfig, OcrBackend};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid {field}: {message}")]
    Invalid { field: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    pub listen_addr: String,
    pub service_name: String,
    pub strategy: ClassifierKind,
    pub ocr_backend: OcrBackend,
    /// Overrides `ocr_backend`'s default threshold when set
    pub ocr_threshold: Option<f64>,
    pub ocr_endpoint: Option<String>,
    pub transcription_endpoint: Option<String>,
    pub transcription_model: String,
    pub serialize_collaborators: bool,
    pub request_timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            service_name: "handwriting_detector".to_string(),
            strategy: ClassifierKind::default(),
            ocr_backend: OcrBackend::default(),
            ocr_threshold: None,
            ocr_endpoint: None,
            transcription_endpoint: None,
            transcription_model: "microsoft/trocr-base-handwritten".to_string(),
            serialize_collaborators: true,
            request_timeout_secs: 120,
        }
    }
}

impl ServiceConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Resolve the final configuration from the command line (and the file it
    /// points at), then validate it
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match cli.config {
            Some(ref path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(cli);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(ref addr) = cli.listen_addr {
            self.listen_addr = addr.clone();
        }
        if let Some(ref name) = cli.service_name {
            self.service_name = name.clone();
        }
        if let Some(strategy) = cli.strategy {
            self.strategy = strategy;
        }
        if let Some(backend) = cli.ocr_backend {
            self.ocr_backend = backend;
        }
        if let Some(threshold) = cli.ocr_threshold {
            self.ocr_threshold = Some(threshold);
        }
        if let Some(ref endpoint) = cli.ocr_endpoint {
            self.ocr_endpoint = Some(endpoint.clone());
        }
        if let Some(ref endpoint) = cli.transcription_endpoint {
            self.transcription_endpoint = Some(endpoint.clone());
        }
        if let Some(ref model) = cli.transcription_model {
            self.transcription_model = model.clone();
        }
        if let Some(serialize) = cli.serialize_collaborators {
            self.serialize_collaborators = serialize;
        }
        if let Some(timeout) = cli.request_timeout_secs {
            self.request_timeout_secs = timeout;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.listen_addr.parse::<std::net::SocketAddr>().is_err() {
            return Err(ConfigError::Invalid {
                field: "listen_addr".to_string(),
                message: format!("'{}' is not a socket address", self.listen_addr),
            });
        }

        if let Some(threshold) = self.ocr_threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ConfigError::Invalid {
                    field: "ocr_threshold".to_string(),
                    message: format!("{} is outside [0, 1]", threshold),
                });
            }
        }

        if self.strategy == ClassifierKind::OcrConfidence && self.ocr_endpoint.is_none() {
            return Err(ConfigError::Invalid {
                field: "ocr_endpoint".to_string(),
                message: "required by the ocr_confidence strategy".to_string(),
            });
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "request_timeout_secs".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    /// Threshold the OCR strategy decides with
    pub fn effective_threshold(&self) -> f64 {
        self.ocr_threshold
            .unwrap_or_else(|| self.ocr_backend.default_threshold())
    }

    pub fn collaborator_config(&self) -> CollaboratorConfig {
        CollaboratorConfig {
            ocr_endpoint: self.ocr_endpoint.clone(),
            ocr_backend: self.ocr_backend,
            transcription_endpoint: self.transcription_endpoint.clone(),
            transcription_model: self.transcription_model.clone(),
            serialize: self.serialize_collaborators,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}
