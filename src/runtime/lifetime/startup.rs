use std::sync::Arc;

use tracing::warn;

use crate::oracle::GradingOracle;
use crate::services::AppServices;
use crate::storage::Storage;

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub oracle: Arc<dyn GradingOracle>,
    pub services: Arc<AppServices>,
}

/// 准备服务器启动的上下文
///
/// 存储与 Oracle 在这里构造一次，显式注入各服务，生命周期与进程
/// 绑定，不存在模块级的隐式单例。
pub async fn prepare_server_startup() -> StartupContext {
    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized");

    let oracle = crate::oracle::create_oracle().expect("Failed to create grading oracle");
    warn!("Grading oracle initialized");

    let services = Arc::new(AppServices::new(storage.clone(), oracle.clone()));

    StartupContext {
        storage,
        oracle,
        services,
    }
}
