//! Telegram — Bot API client: long-polling for updates and sendMessage.

use std::time::Duration;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::auth::Identity;
use crate::transport::chat::{ChatTransport, CommandContext, DeliveryError};

/// Telegram rejects messages longer than this many characters.
pub const TELEGRAM_MAX_CHARS: usize = 4096;

/// Slack on top of the long-poll timeout before the HTTP client gives up.
const HTTP_TIMEOUT_SLACK: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    description: Option<String>,
    result: Option<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
struct BotUser {
    #[serde(default)]
    username: Option<String>,
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: Identity,
    text: &'a str,
}

impl Update {
    /// The reply context and text of a message update, if it carries text.
    pub fn text_message(&self) -> Option<(CommandContext, &str)> {
        let message = self.message.as_ref()?;
        let text = message.text.as_deref()?;
        let ctx = CommandContext {
            chat_id: message.chat.id,
            message_id: message.message_id,
        };
        Some((ctx, text))
    }
}

pub struct TelegramClient {
    http: reqwest::Client,
    api_base: String,
    token: String,
}

impl TelegramClient {
    pub fn new(api_base: &str, token: &str, poll_timeout: Duration) -> Result<Self, DeliveryError> {
        let http = reqwest::Client::builder()
            .timeout(poll_timeout.saturating_add(HTTP_TIMEOUT_SLACK))
            .build()
            .map_err(strip_url)?;
        Ok(Self {
            http,
            api_base: api_base.trim().trim_end_matches('/').to_string(),
            token: token.trim().to_string(),
        })
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }

    /// The bot's own username, used to tell commands meant for other bots apart in groups.
    pub async fn get_me(&self) -> Result<Option<String>, DeliveryError> {
        let response = self.http
            .get(self.endpoint("getMe"))
            .send()
            .await
            .map_err(strip_url)?;
        let me: BotUser = decode(response).await?;
        Ok(me.username)
    }

    /// Long-poll for updates with id >= `offset`.
    pub async fn get_updates(&self, offset: i64, timeout: Duration) -> Result<Vec<Update>, DeliveryError> {
        let response = self.http
            .get(self.endpoint("getUpdates"))
            .query(&[
                ("offset", offset.to_string()),
                ("timeout", timeout.as_secs().to_string()),
                ("allowed_updates", r#"["message"]"#.to_string()),
            ])
            .send()
            .await
            .map_err(strip_url)?;
        decode(response).await
    }

    /// Send `text` to `chat_id`, split into several messages when it exceeds
    /// the Telegram length limit.
    pub async fn send_message(&self, chat_id: Identity, text: &str) -> Result<(), DeliveryError> {
        for chunk in split_message(text, TELEGRAM_MAX_CHARS) {
            let response = self.http
                .post(self.endpoint("sendMessage"))
                .json(&SendMessage { chat_id, text: &chunk })
                .send()
                .await
                .map_err(strip_url)?;
            decode::<serde_json::Value>(response).await?;
        }
        Ok(())
    }
}

impl ChatTransport for TelegramClient {
    fn notify<'a>(&'a self, recipient: Identity, text: &'a str) -> BoxFuture<'a, Result<(), DeliveryError>> {
        self.send_message(recipient, text).boxed()
    }

    fn reply<'a>(&'a self, ctx: &'a CommandContext, text: &'a str) -> BoxFuture<'a, Result<(), DeliveryError>> {
        self.send_message(ctx.chat_id, text).boxed()
    }
}

/// Request URLs contain the bot token; never let them reach an error message.
fn strip_url(e: reqwest::Error) -> DeliveryError {
    DeliveryError::Http(e.without_url())
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, DeliveryError> {
    let status = response.status();
    let body: ApiResponse<T> = response.json().await.map_err(strip_url)?;
    if !body.ok {
        let detail = body.description.unwrap_or_else(|| format!("HTTP {}", status));
        return Err(DeliveryError::Api(detail));
    }
    body.result
        .ok_or_else(|| DeliveryError::Api("response without result".to_string()))
}

/// Split `text` into chunks of at most `max_chars` characters, breaking at
/// line boundaries where possible and inside a line only when it is too long.
pub fn split_message(text: &str, max_chars: usize) -> Vec<String> {
    if max_chars == 0 || text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;
    let mut has_line = false;

    for line in text.split('\n') {
        let line_len = line.chars().count();
        if has_line && current_len + 1 + line_len <= max_chars {
            current.push('\n');
            current.push_str(line);
            current_len += 1 + line_len;
            continue;
        }
        if has_line {
            push_non_empty(&mut chunks, std::mem::take(&mut current));
            current_len = 0;
            has_line = false;
        }
        if line_len <= max_chars {
            current.push_str(line);
            current_len = line_len;
            has_line = true;
            continue;
        }

        let chars: Vec<char> = line.chars().collect();
        let mut pieces = chars.chunks(max_chars).peekable();
        while let Some(piece) = pieces.next() {
            let piece_text: String = piece.iter().collect();
            if pieces.peek().is_some() {
                chunks.push(piece_text);
            } else {
                current = piece_text;
                current_len = piece.len();
                has_line = true;
            }
        }
    }

    if has_line {
        push_non_empty(&mut chunks, current);
    }
    chunks
}

/// Telegram rejects empty messages, so blank lines at a chunk boundary are dropped.
fn push_non_empty(chunks: &mut Vec<String>, chunk: String) {
    if !chunk.is_empty() {
        chunks.push(chunk);
    }
}
