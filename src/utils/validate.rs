use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{GradeFlowError, Result};

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid username regex"));

/// 按字段累积的校验错误
///
/// 校验过程把所有问题收集完再一次性报告，错误信息形如
/// "title: 不能为空; due_date: 无法解析的日期"。
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: Vec<(String, String)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push((field.into(), message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// 无错误时返回 Ok，否则汇总为一个 Validation 错误
    pub fn into_result(self) -> Result<()> {
        if self.errors.is_empty() {
            return Ok(());
        }
        let joined = self
            .errors
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("; ");
        Err(GradeFlowError::validation(joined))
    }
}

/// 必填字符串字段
pub fn require_non_empty(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(field, "不能为空");
    }
}

/// 成绩必须位于 0-100
pub fn check_score_range(errors: &mut FieldErrors, field: &str, score: i32) {
    if !(0..=100).contains(&score) {
        errors.push(field, format!("成绩 {score} 超出 0-100 范围"));
    }
}

/// 解析 RFC3339 日期字符串
pub fn parse_rfc3339(value: &str) -> std::result::Result<chrono::DateTime<chrono::Utc>, String> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(|e| format!("无法解析的日期 '{value}': {e}"))
}

pub fn validate_username(username: &str) -> std::result::Result<(), &'static str> {
    // 用户名长度校验：3 <= x <= 32
    if username.len() < 3 || username.len() > 32 {
        return Err("用户名长度必须在 3 到 32 个字符之间");
    }
    // 用户名格式校验：只能包含字母、数字、下划线或连字符
    if !USERNAME_RE.is_match(username) {
        return Err("用户名只能包含字母、数字、下划线或连字符");
    }
    Ok(())
}
