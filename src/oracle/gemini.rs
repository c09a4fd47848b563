//! Gemini 评分提供方
//!
//! 调用 generateContent 接口。Gemini 没有严格的 JSON 输出模式，
//! 解析层需容忍 Markdown 代码块包裹。

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::{AssignmentContext, GradeOutcome, GradingOracle, build_grading_prompt,
    parse_grade_payload};
use crate::config::OracleConfig;
use crate::errors::{GradeFlowError, Result};

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiOracle {
    client: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiOracle {
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
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    text: Option<String>,
}

#[async_trait::async_trait]
impl GradingOracle for GeminiOracle {
    async fn grade(&self, content: &str, context: &AssignmentContext) -> Result<GradeOutcome> {
        let prompt = build_grading_prompt(content, context);
        let body = json!({
            "contents": [
                { "parts": [ { "text": prompt } ] }
            ]
        });

        debug!(model = %self.model, "Requesting Gemini grading");

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        );
        let response = self.client.post(url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(GradeFlowError::oracle_unavailable(format!(
                "Gemini 返回 {status}: {detail}"
            )));
        }

        let reply: GenerateContentResponse = response.json().await.map_err(|e| {
            GradeFlowError::oracle_response_parse(format!("Gemini 响应体解析失败: {e}"))
        })?;
        let text = reply
            .candidates
            .first()
            .and_then(|candidate| candidate.content.parts.first())
            .and_then(|part| part.text.as_deref())
            .ok_or_else(|| GradeFlowError::oracle_response_parse("Gemini 返回了空回复"))?;

        parse_grade_payload(text)
    }
}
