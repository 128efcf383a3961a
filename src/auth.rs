//! 认证模块
//!
//! 管理用户会话状态，与路由系统解耦。
//! 路由服务通过注入的认证信号来检查认证状态。

use crate::api::{ApiError, ResumeAiApi};
use crate::config;
use crate::protocol::SignupRequest;
use crate::web::LocalStorage;
use leptos::prelude::*;

/// 会话令牌在 LocalStorage 中的存储键，唯一的持久化产物
const STORAGE_TOKEN_KEY: &str = "authToken";

/// 认证状态
#[derive(Clone)]
pub struct AuthState {
    /// API 客户端实例
    pub api: ResumeAiApi,
    /// 当前会话令牌（None 表示未登录）
    pub token: Option<String>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            api: ResumeAiApi::new(config::api_base_url()),
            token: None,
        }
    }
}

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 认证状态（只读）
    pub state: ReadSignal<AuthState>,
    /// 设置认证状态（写入）
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    /// 创建新的认证上下文
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState::default());
        Self { state, set_state }
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().token.is_some())
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 读取持久化的会话令牌
///
/// 请求网关在每次发请求时调用。写入只发生在登录与登出。
pub(crate) fn stored_token() -> Option<String> {
    LocalStorage::get(STORAGE_TOKEN_KEY)
}

/// 初始化认证状态
///
/// 进程启动时从 Token Store 恢复会话：有令牌即视为已认证，
/// 令牌是否仍被后端接受由后续请求裁决。
pub fn init_auth(ctx: &AuthContext) {
    if let Some(token) = LocalStorage::get(STORAGE_TOKEN_KEY) {
        ctx.set_state.update(|state| state.token = Some(token));
    }
}

/// 登录并持久化会话
///
/// 成功时写入 Token Store 并更新内存状态；
/// 失败时不做任何状态变更，内存与存储均保持原样。
pub async fn login(ctx: &AuthContext, email: String, password: String) -> Result<(), ApiError> {
    let api = ctx.state.get_untracked().api;
    let issued = api.login(&email, &password).await?;

    LocalStorage::set(STORAGE_TOKEN_KEY, &issued.access_token);
    ctx.set_state
        .update(|state| state.token = Some(issued.access_token));
    Ok(())
}

/// 注册新账号
///
/// 注册成功不建立会话，调用方需引导用户自行登录。
pub async fn signup(ctx: &AuthContext, profile: SignupRequest) -> Result<(), ApiError> {
    let api = ctx.state.get_untracked().api;
    api.signup(&profile).await
}

/// 登出并清除会话（幂等，重复调用无副作用）
///
/// 注意：不需要手动导航，路由服务会监听认证状态变化并自动重定向。
pub fn logout(ctx: &AuthContext) {
    LocalStorage::remove(STORAGE_TOKEN_KEY);
    ctx.set_state.update(|state| state.token = None);
}
