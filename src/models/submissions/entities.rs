use serde::{Deserialize, Serialize};

// 提交状态机：submitted → ai_graded → teacher_reviewed，只进不退
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Submitted,       // 已提交，等待自动评分
    AiGraded,        // 自动评分完成，待教师复核
    TeacherReviewed, // 教师已复核
}

impl SubmissionStatus {
    pub const SUBMITTED: &'static str = "submitted";
    pub const AI_GRADED: &'static str = "ai_graded";
    pub const TEACHER_REVIEWED: &'static str = "teacher_reviewed";

    /// 状态在状态机中的序号，用于保证状态单调前进
    pub fn rank(&self) -> u8 {
        match self {
            SubmissionStatus::Submitted => 0,
            SubmissionStatus::AiGraded => 1,
            SubmissionStatus::TeacherReviewed => 2,
        }
    }

    /// 目标状态是否是合法的前进方向（允许原地不动，用于幂等复核）
    pub fn can_advance_to(&self, next: SubmissionStatus) -> bool {
        next.rank() >= self.rank()
    }
}

impl<'de> Deserialize<'de> for SubmissionStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            SubmissionStatus::SUBMITTED => Ok(SubmissionStatus::Submitted),
            SubmissionStatus::AI_GRADED => Ok(SubmissionStatus::AiGraded),
            SubmissionStatus::TEACHER_REVIEWED => Ok(SubmissionStatus::TeacherReviewed),
            _ => Err(serde::de::Error::custom(format!(
                "无效的提交状态: '{s}'. 支持的状态: submitted, ai_graded, teacher_reviewed"
            ))),
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::Submitted => write!(f, "{}", SubmissionStatus::SUBMITTED),
            SubmissionStatus::AiGraded => write!(f, "{}", SubmissionStatus::AI_GRADED),
            SubmissionStatus::TeacherReviewed => {
                write!(f, "{}", SubmissionStatus::TEACHER_REVIEWED)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    // 关联作业 ID
    pub assignment_id: i64,
    // 提交学生 ID
    pub student_id: i64,
    // 提交正文
    pub content: String,
    pub status: SubmissionStatus,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}
