//! OpenAI-style chat completions protocol.
//!
//! Spoken by OpenAI, DeepSeek, Mistral, and every configured compatible
//! endpoint.

use council_application::GatewayError;
use council_domain::{util, Participant};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

pub(super) async fn complete(
    client: &reqwest::Client,
    base_url: &str,
    participant: &Participant,
    prompt: &str,
) -> Result<String, GatewayError> {
    let url = format!("{}/chat/completions", base_url.trim_end_matches('/'));
    let body = ChatRequest {
        model: &participant.model,
        messages: vec![ChatMessage {
            role: "user",
            content: prompt,
        }],
    };

    let response = client
        .post(&url)
        .bearer_auth(participant.credential.expose())
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

    let parsed: ChatResponse = response
        .json()
        .await
        .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| {
            GatewayError::MalformedResponse("response carried no message content".to_string())
        })
}
