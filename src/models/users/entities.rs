use serde::{Deserialize, Serialize};

// 用户角色
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Teacher, // 教师
    Student, // 学生
}

impl UserRole {
    pub const TEACHER: &'static str = "teacher";
    pub const STUDENT: &'static str = "student";

    pub fn teacher_roles() -> &'static [&'static UserRole] {
        &[&Self::Teacher]
    }
    pub fn student_roles() -> &'static [&'static UserRole] {
        &[&Self::Student]
    }
    pub fn all_roles() -> &'static [&'static UserRole] {
        &[&Self::Teacher, &Self::Student]
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            UserRole::TEACHER => Ok(UserRole::Teacher),
            UserRole::STUDENT => Ok(UserRole::Student),
            _ => Err(serde::de::Error::custom(format!(
                "无效的用户角色: '{s}'. 支持的角色: teacher, student"
            ))),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Teacher => write!(f, "{}", UserRole::TEACHER),
            UserRole::Student => write!(f, "{}", UserRole::STUDENT),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "teacher" => Ok(UserRole::Teacher),
            "student" => Ok(UserRole::Student),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    // 所属院系，教师可选填写
    pub department: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// 请求方身份：角色 + 用户 ID
///
/// 认证机制（会话、令牌）由边界适配层负责，核心只关心"调用者是谁"。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub id: i64,
    pub role: UserRole,
}

impl Identity {
    pub fn teacher(id: i64) -> Self {
        Self {
            id,
            role: UserRole::Teacher,
        }
    }

    pub fn student(id: i64) -> Self {
        Self {
            id,
            role: UserRole::Student,
        }
    }

    pub fn is_teacher(&self) -> bool {
        self.role == UserRole::Teacher
    }

    pub fn is_student(&self) -> bool {
        self.role == UserRole::Student
    }
}
