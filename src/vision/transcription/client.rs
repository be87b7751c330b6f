// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Transcription sidecar client via OpenAI-compatible API

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use image::DynamicImage;
use reqwest::Client;
use tracing::{debug, info};

use super::{TranscribeError, TranscriptionModel};
use crate::vision::image_utils::encode_png_base64;

// --- OpenAI-compatible serde structs ---

#[derive(serde::Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(serde::Serialize)]
struct ChatMessage {
    role: String,
    content: serde_json::Value,
}

#[derive(serde::Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(serde::Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(serde::Deserialize)]
struct ChatResponseMessage {
    content: String,
}

const TRANSCRIBE_PROMPT: &str = "Transcribe the handwritten text in this image. Return only the transcribed text with no commentary. If there is no text, respond with an empty string.";

/// Client for a transcription model served behind an OpenAI-compatible API
pub struct TranscriptionClient {
    client: Client,
    endpoint: String,
    model_name: String,
}

impl TranscriptionClient {
    /// Create a new transcription client
    pub fn new(endpoint: &str, model_name: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        let endpoint = endpoint.trim_end_matches('/').to_string();
        info!(
            "Transcription client configured: endpoint={}, model={}",
            endpoint, model_name
        );

        Ok(Self {
            client,
            endpoint,
            model_name: model_name.to_string(),
        })
    }

    /// Get the model name
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Check if the transcription sidecar is healthy
    pub async fn health_check(&self) -> bool {
        match self
            .client
            .get(format!("{}/health", self.endpoint))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                debug!("Transcription health check failed: {}", e);
                false
            }
        }
    }

    fn build_request(&self, base64_image: &str) -> ChatRequest {
        let data_url = format!("data:image/png;base64,{}", base64_image);

        ChatRequest {
            model: self.model_name.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: serde_json::json!([
                    {"type": "text", "text": TRANSCRIBE_PROMPT},
                    {"type": "image_url", "image_url": {"url": data_url}}
                ]),
            }],
            max_tokens: 1024,
            temperature: 0.0,
        }
    }
}

#[async_trait]
impl TranscriptionModel for TranscriptionClient {
    async fn generate(&self, image: &DynamicImage) -> Result<String, TranscribeError> {
        let start = std::time::Instant::now();
        let encoded =
            encode_png_base64(image).map_err(|e| TranscribeError::Collaborator(e.to_string()))?;
        let request = self.build_request(&encoded);

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.endpoint))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranscribeError::Collaborator(format!(
                "{} returned HTTP {}",
                self.model_name, status
            )));
        }

        let chat_response: ChatResponse = response.json().await?;
        let text = first_choice_text(chat_response)?;

        debug!(
            "Transcription complete: {} chars, {}ms",
            text.len(),
            start.elapsed().as_millis()
        );

        Ok(text)
    }
}

/// Trimmed content of the first choice; a reply without choices is malformed
fn first_choice_text(response: ChatResponse) -> Result<String, TranscribeError> {
    response
        .choices
        .first()
        .map(|c| c.message.content.trim().to_string())
        .ok_or_else(|| TranscribeError::Collaborator("response had no choices".to_string()))
}
