//! 服务层测试共用的现场搭建

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::models::{
    assignments::entities::{AssignmentKind, AssignmentStatus},
    assignments::requests::NewAssignment,
    classes::requests::CreateClassRequest,
    feedbacks::entities::AiComments,
    feedbacks::requests::ReviewFeedbackRequest,
    users::entities::{Identity, UserRole},
    users::requests::CreateUserRequest,
};
use crate::oracle::GradeOutcome;
use crate::storage::{Storage, memory::MemoryStorage};

pub(crate) struct Harness {
    pub storage: Arc<dyn Storage>,
    pub teacher: Identity,
    pub other_teacher: Identity,
    // Alice，已选课
    pub student: Identity,
    // Bob，已选课
    pub classmate: Identity,
    // Eve，未选课
    pub outsider: Identity,
    pub class_id: i64,
    pub assignment_id: i64,
    pub second_assignment_id: i64,
}

/// 一个教师带一个班、两份作业，两名在读学生与一名旁观学生
pub(crate) async fn harness() -> Harness {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());

    let mut identities = Vec::new();
    for (username, first, last, role) in [
        ("teacher-main", "Grace", "Hopper", UserRole::Teacher),
        ("teacher-other", "Alan", "Kay", UserRole::Teacher),
        ("alice", "Alice", "Chen", UserRole::Student),
        ("bob", "Bob", "Liu", UserRole::Student),
        ("eve", "Eve", "Wang", UserRole::Student),
    ] {
        let user = storage
            .create_user(CreateUserRequest {
                username: username.to_string(),
                first_name: first.to_string(),
                last_name: last.to_string(),
                role,
                department: None,
            })
            .await
            .unwrap();
        identities.push(Identity {
            id: user.id,
            role,
        });
    }

    let class = storage
        .create_class(
            identities[0].id,
            CreateClassRequest {
                name: "Literature 101".to_string(),
                description: Some("Intro course".to_string()),
            },
        )
        .await
        .unwrap();
    storage
        .enroll_student(identities[2].id, class.id)
        .await
        .unwrap();
    storage
        .enroll_student(identities[3].id, class.id)
        .await
        .unwrap();

    let mut assignment_ids = Vec::new();
    for title in ["Essay 1", "Essay 2"] {
        let assignment = storage
            .create_assignment(NewAssignment {
                class_id: class.id,
                title: title.to_string(),
                description: "Write an essay".to_string(),
                kind: AssignmentKind::Essay,
                due_date: chrono::Utc::now() + chrono::TimeDelta::days(7),
                status: AssignmentStatus::Open,
                rubric: None,
            })
            .await
            .unwrap();
        assignment_ids.push(assignment.id);
    }

    Harness {
        storage,
        teacher: identities[0],
        other_teacher: identities[1],
        student: identities[2],
        classmate: identities[3],
        outsider: identities[4],
        class_id: class.id,
        assignment_id: assignment_ids[0],
        second_assignment_id: assignment_ids[1],
    }
}

/// 固定的 Oracle 成功结果
pub(crate) fn good_outcome(score: i32) -> GradeOutcome {
    GradeOutcome {
        score,
        rubric_scores: BTreeMap::from([("content".to_string(), score)]),
        feedback: AiComments {
            strengths: vec!["clear".to_string()],
            improvements: vec!["depth".to_string()],
            comments: "good".to_string(),
        },
    }
}

/// 固定的复核请求
pub(crate) fn review_request(score: i32, comments: &str) -> ReviewFeedbackRequest {
    ReviewFeedbackRequest {
        teacher_score: score,
        teacher_comments: Some(comments.to_string()),
        rubric_scores: None,
    }
}
