use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::auth;
use crate::config::Config;

/// Run a future to completion from sync code.
///
/// The CLI uses #[tokio::main], so we're often already inside a runtime.
/// Creating a nested runtime and calling block_on will panic.
///
/// Strategy:
/// - If a runtime is already running: use block_in_place + Handle::block_on
/// - Otherwise: create a runtime and block_on
pub fn block_on<F: std::future::Future>(fut: F) -> Result<F::Output> {
    if let Ok(handle) = tokio::runtime::Handle::try_current() {
        Ok(tokio::task::block_in_place(|| handle.block_on(fut)))
    } else {
        let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
        Ok(rt.block_on(fut))
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    #[serde(rename = "sessionId")]
    session_id: &'a str,
}

/// Reply field names vary across assistant deployments; accept each
/// shape explicitly and normalize to plain text.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AssistantReply {
    Content { content: String },
    Message { message: String },
    Response { response: String },
}

impl AssistantReply {
    fn into_text(self) -> String {
        match self {
            AssistantReply::Content { content } => content,
            AssistantReply::Message { message } => message,
            AssistantReply::Response { response } => response,
        }
    }
}

pub fn chat_reply(config: &Config, session_id: &str, message: &str) -> Result<String> {
    block_on(chat_reply_async(config, session_id, message))?
}

async fn chat_reply_async(config: &Config, session_id: &str, message: &str) -> Result<String> {
    let a = auth::load_auth()?;

    let body = ChatRequest {
        message,
        session_id,
    };

    let client = reqwest::Client::new();
    let mut req = client
        .post(format!("{}/api/ai-chat", config.assistant.base_url))
        .json(&body);
    if let Some(token) = &a.access_token {
        req = req.bearer_auth(token);
    }

    let resp = req.send().await.context("assistant request")?;

    let status = resp.status();
    if !status.is_success() {
        let txt = resp.text().await.unwrap_or_default();
        bail!("assistant error: {status} {txt}");
    }

    let out: AssistantReply = resp.json().await.context("parse assistant response")?;
    Ok(out.into_text().trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_field_variants_normalize() {
        let r: AssistantReply =
            serde_json::from_str(r#"{"type":"general","content":"안녕하세요!","needsVoice":true}"#)
                .unwrap();
        assert_eq!(r.into_text(), "안녕하세요!");

        let r: AssistantReply = serde_json::from_str(r#"{"message":"네!"}"#).unwrap();
        assert_eq!(r.into_text(), "네!");

        let r: AssistantReply = serde_json::from_str(r#"{"response":"좋아요"}"#).unwrap();
        assert_eq!(r.into_text(), "좋아요");
    }

    #[test]
    fn test_unknown_reply_shape_is_an_error() {
        let r: Result<AssistantReply, _> = serde_json::from_str(r#"{"ok":true}"#);
        assert!(r.is_err());
    }
}
