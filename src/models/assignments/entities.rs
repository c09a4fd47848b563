use serde::{Deserialize, Serialize};

// 作业题型
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentKind {
    Essay,          // 论述题
    MultipleChoice, // 选择题
    ShortAnswer,    // 简答题
}

impl AssignmentKind {
    pub const ESSAY: &'static str = "essay";
    pub const MULTIPLE_CHOICE: &'static str = "multiple_choice";
    pub const SHORT_ANSWER: &'static str = "short_answer";
}

impl<'de> Deserialize<'de> for AssignmentKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            AssignmentKind::ESSAY => Ok(AssignmentKind::Essay),
            AssignmentKind::MULTIPLE_CHOICE => Ok(AssignmentKind::MultipleChoice),
            AssignmentKind::SHORT_ANSWER => Ok(AssignmentKind::ShortAnswer),
            _ => Err(serde::de::Error::custom(format!(
                "无效的作业题型: '{s}'. 支持的题型: essay, multiple_choice, short_answer"
            ))),
        }
    }
}

impl std::fmt::Display for AssignmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentKind::Essay => write!(f, "{}", AssignmentKind::ESSAY),
            AssignmentKind::MultipleChoice => write!(f, "{}", AssignmentKind::MULTIPLE_CHOICE),
            AssignmentKind::ShortAnswer => write!(f, "{}", AssignmentKind::SHORT_ANSWER),
        }
    }
}

// 作业状态，存储后不会被系统自动流转
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Open,
    Closed,
    Graded,
}

impl Default for AssignmentStatus {
    fn default() -> Self {
        AssignmentStatus::Open
    }
}

/// 评分细则中的单项标准
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RubricCriterion {
    pub name: String,
    // 权重，百分比
    pub weight: u32,
}

/// 评分细则
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rubric {
    pub criteria: Vec<RubricCriterion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    // 唯一 ID
    pub id: i64,
    // 关联的班级 ID
    pub class_id: i64,
    // 作业标题
    pub title: String,
    // 作业描述
    pub description: String,
    // 作业题型
    #[serde(rename = "type")]
    pub kind: AssignmentKind,
    // 截止时间
    pub due_date: chrono::DateTime<chrono::Utc>,
    // 作业状态
    pub status: AssignmentStatus,
    // 评分细则，缺省时评分使用默认细则
    pub rubric: Option<Rubric>,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
}
