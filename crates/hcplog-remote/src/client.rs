use crate::{RemoteError, Result};
use hcplog_core::domain::{ChatMessage, ChatMessageId, ChatReply, InteractionRecord, MessageKind};
use hcplog_core::draft::is_draft_reply;
use hcplog_core::dto::{InteractionLogDto, LogConfirmation};
use hcplog_core::service::{ChatSession, InteractionRecordStore};
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use url::Url;

const FORM_PATH: &str = "api/log_interaction/form";
const CONFIRM_PATH: &str = "api/log_interaction/chat_confirm";
const CHAT_PATH: &str = "api/log_interaction/chat";
const LOGS_PATH: &str = "api/logs";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Blocking client for the interaction logger HTTP API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    history: &'a [ChatMessage],
}

/// Reply body as sent by the server, which may omit `type`.
#[derive(Debug, Deserialize)]
struct ChatReplyBody {
    #[serde(default)]
    id: Option<ChatMessageId>,
    reply: String,
    #[serde(rename = "type", default)]
    kind: Option<MessageKind>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        debug!(url = %url, "POST");
        let response = self.client.post(url).json(body).send()?;
        decode(response)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        debug!(url = %url, "GET");
        let response = self.client.get(url).send()?;
        decode(response)
    }
}

impl InteractionRecordStore for ApiClient {
    type Error = RemoteError;

    fn log_form(&self, record: &InteractionRecord) -> Result<LogConfirmation> {
        self.post_json(FORM_PATH, record)
    }

    fn confirm_draft(&self, record: &InteractionRecord) -> Result<LogConfirmation> {
        self.post_json(CONFIRM_PATH, record)
    }

    fn list(&self) -> Result<Vec<InteractionLogDto>> {
        self.get_json(LOGS_PATH)
    }
}

impl ChatSession for ApiClient {
    type Error = RemoteError;

    fn exchange(&self, message: &str, history: &[ChatMessage]) -> Result<ChatReply> {
        if message.trim().is_empty() {
            return Err(RemoteError::InvalidRequest(
                "message cannot be empty".to_string(),
            ));
        }
        let body: ChatReplyBody = self.post_json(CHAT_PATH, &ChatRequest { message, history })?;
        Ok(into_reply(body))
    }
}

fn into_reply(body: ChatReplyBody) -> ChatReply {
    let kind = body.kind.unwrap_or_else(|| {
        if is_draft_reply(&body.reply) {
            MessageKind::Draft
        } else {
            MessageKind::Text
        }
    });
    ChatReply {
        id: body.id.unwrap_or_default(),
        reply: body.reply,
        kind,
    }
}

/// Normalizes the base so relative endpoint paths join beneath it.
fn parse_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    let mut url = Url::parse(trimmed)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(RemoteError::InvalidRequest(format!(
            "unsupported url scheme: {}",
            url.scheme()
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json()?);
    }
    let text = response.text().unwrap_or_default();
    Err(RemoteError::Status {
        status: status.as_u16(),
        detail: error_detail(&text),
    })
}

fn error_detail(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: serde_json::Value::String(detail),
        }) => detail,
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) if body.trim().is_empty() => "no details".to_string(),
        Err(_) => body.trim().to_string(),
    }
}
