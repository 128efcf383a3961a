//! 后端地址配置
//!
//! 后端基础 URL 只在此处定义：构建时通过环境变量 `RESUME_AI_API_BASE`
//! 统一注入，未设置时退回本地开发默认值。代码中不允许出现第二份地址字面量。

/// 本地开发默认后端地址
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// 解析后端基础 URL（唯一入口）
pub fn api_base_url() -> String {
    option_env!("RESUME_AI_API_BASE")
        .unwrap_or(DEFAULT_API_BASE)
        .to_string()
}
