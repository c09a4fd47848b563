//! 业务逻辑层
//!
//! 每个服务持有存储与访问策略（提交服务另持有评分 Oracle），
//! 操作以调用者身份 Identity 为第一输入、返回领域 Result。
//! 服务不感知传输层，权限与生命周期逻辑可以脱离 HTTP 单测。

pub mod assignments;
pub mod classes;
pub mod feedbacks;
pub mod stats;
pub mod submissions;
pub mod users;

pub use assignments::AssignmentService;
pub use classes::ClassService;
pub use feedbacks::FeedbackService;
pub use stats::StatsService;
pub use submissions::SubmissionService;
pub use users::UserService;

use std::sync::Arc;

use crate::oracle::GradingOracle;
use crate::storage::Storage;

/// 全部服务的显式装配
///
/// 存储与 Oracle 在进程启动时构造一次、注入到各服务，
/// 不存在任何隐式全局可变状态。
pub struct AppServices {
    pub users: UserService,
    pub classes: ClassService,
    pub assignments: AssignmentService,
    pub submissions: SubmissionService,
    pub feedbacks: FeedbackService,
    pub stats: StatsService,
}

impl AppServices {
    pub fn new(storage: Arc<dyn Storage>, oracle: Arc<dyn GradingOracle>) -> Self {
        Self {
            users: UserService::new(storage.clone()),
            classes: ClassService::new(storage.clone()),
            assignments: AssignmentService::new(storage.clone()),
            submissions: SubmissionService::new(storage.clone(), oracle),
            feedbacks: FeedbackService::new(storage.clone()),
            stats: StatsService::new(storage),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing;
