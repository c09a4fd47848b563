//! GradeFlow - AI 辅助作业评分后端服务
//!
//! 基于 Actix Web 构建的提交/评分生命周期管理系统。
//! 学生提交作业 → 评分 Oracle 自动评分 → 教师复核，
//! 所有读写都经过集中的访问策略。
//!
//! # 架构
//! - `config`: 配置管理
//! - `errors`: 统一错误处理
//! - `middlewares`: 身份与角色中间件
//! - `models`: 数据模型定义
//! - `oracle`: 评分 Oracle 客户端（OpenAI/Gemini 可互换）
//! - `policy`: 集中的访问策略
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层（提交生命周期、聚合视图）
//! - `storage`: 数据存储层（内存参考实现）
//! - `utils`: 工具函数

pub mod config;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod oracle;
pub mod policy;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
