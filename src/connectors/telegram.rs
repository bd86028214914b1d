// src/connectors/telegram.rs
use crate::connectors::messages::TelegramResponse;
use crate::connectors::traits::NotificationSink;
use crate::error::{BotError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

pub struct TelegramClient {
    bot_token: String,
    chat_id: String,
    http_client: Client,
    base_url: String,
}

impl TelegramClient {
    pub fn new(bot_token: String, chat_id: String, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BotError::DispatchFailure(format!("http client: {}", e)))?;

        Ok(Self {
            bot_token,
            chat_id,
            http_client,
            base_url: "https://api.telegram.org".to_string(),
        })
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.base_url, self.bot_token)
    }
}

#[async_trait]
impl NotificationSink for TelegramClient {
    async fn send_message(&self, text: &str) -> Result<()> {
        let payload = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
            parse_mode: "Markdown",
        };

        // reqwest errors embed the URL, which carries the bot token.
        let response = self
            .http_client
            .post(self.send_message_url())
            .json(&payload)
            .send()
            .await
            .map_err(|e| BotError::DispatchFailure(e.without_url().to_string()))?;

        let status = response.status();
        let body: TelegramResponse = response
            .json()
            .await
            .map_err(|e| {
                BotError::DispatchFailure(format!("HTTP {}: {}", status, e.without_url()))
            })?;

        if !body.ok {
            return Err(BotError::DispatchFailure(format!(
                "HTTP {}: {}",
                status,
                body.description.unwrap_or_else(|| "no description".to_string())
            )));
        }
        Ok(())
    }
}
