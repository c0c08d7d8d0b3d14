//! Anthropic messages protocol.

use council_application::GatewayError;
use council_domain::{util, Participant};
use serde::{Deserialize, Serialize};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 4096;

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

pub(super) async fn complete(
    client: &reqwest::Client,
    base_url: &str,
    participant: &Participant,
    prompt: &str,
) -> Result<String, GatewayError> {
    let url = format!("{}/messages", base_url.trim_end_matches('/'));
    let body = MessagesRequest {
        model: &participant.model,
        max_tokens: MAX_TOKENS,
        messages: vec![Message {
            role: "user",
            content: prompt,
        }],
    };

    let response = client
        .post(&url)
        .header("x-api-key", participant.credential.expose())
        .header("anthropic-version", ANTHROPIC_VERSION)
        .json(&body)
        .send()
        .await
        .map_err(|e| GatewayError::Connection(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let detail = response.text().await.unwrap_or_default();
        return Err(GatewayError::RequestFailed(format!(
            "{status}: {}",
            util::excerpt(&detail, 200)
        )));
    }

    let parsed: MessagesResponse = response
        .json()
        .await
        .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;

    let text: String = parsed
        .content
        .into_iter()
        .filter_map(|block| match block {
            ContentBlock::Text { text } => Some(text),
            ContentBlock::Other => None,
        })
        .collect();

    if text.is_empty() {
        return Err(GatewayError::MalformedResponse(
            "response carried no text blocks".to_string(),
        ));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_max_tokens() {
        let body = MessagesRequest {
            model: "claude-sonnet-4-5",
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user",
                content: "hello",
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "claude-sonnet-4-5");
        assert_eq!(json["max_tokens"], 4096);
        assert_eq!(json["messages"][0]["content"], "hello");
    }

    #[test]
    fn text_blocks_are_joined() {
        let raw = r#"{
            "content": [
                {"type": "text", "text": "Part one. "},
                {"type": "tool_use", "id": "t1", "name": "x", "input": {}},
                {"type": "text", "text": "Part two."}
            ]
        }"#;
        let parsed: MessagesResponse = serde_json::from_str(raw).unwrap();
        let text: String = parsed
            .content
            .into_iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text),
                ContentBlock::Other => None,
            })
            .collect();
        assert_eq!(text, "Part one. Part two.");
    }
}
