//! OpenAI 评分提供方
//!
//! 调用 Chat Completions 接口并要求 JSON 格式输出。

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::{AssignmentContext, GradeOutcome, GradingOracle, build_grading_prompt,
    parse_grade_payload};
use crate::config::OracleConfig;
use crate::errors::{GradeFlowError, Result};

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";
const SYSTEM_PROMPT: &str = "You are an expert teacher assistant with expertise in grading and providing constructive feedback.";

pub struct OpenAiOracle {
    client: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl OpenAiOracle {
    pub fn from_config(config: &OracleConfig) -> Self {
        let endpoint = if config.endpoint.is_empty() {
            DEFAULT_ENDPOINT.to_string()
        } else {
            config.endpoint.trim_end_matches('/').to_string()
        };
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(config.timeout))
                .build()
                .expect("Failed to build HTTP client"),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            endpoint,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[async_trait::async_trait]
impl GradingOracle for OpenAiOracle {
    async fn grade(&self, content: &str, context: &AssignmentContext) -> Result<GradeOutcome> {
        let prompt = build_grading_prompt(content, context);
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": prompt }
            ],
            "response_format": { "type": "json_object" }
        });

        debug!(model = %self.model, "Requesting OpenAI grading");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.endpoint))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(GradeFlowError::oracle_unavailable(format!(
                "OpenAI 返回 {status}: {detail}"
            )));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            GradeFlowError::oracle_response_parse(format!("OpenAI 响应体解析失败: {e}"))
        })?;
        let text = completion
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .ok_or_else(|| GradeFlowError::oracle_response_parse("OpenAI 返回了空回复"))?;

        parse_grade_payload(text)
    }
}
