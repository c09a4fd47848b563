/// 应用启动时间，注入到 app_data 供运行时长统计使用
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
