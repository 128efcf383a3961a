//! Resume AI 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义与守卫决策（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 会话状态管理
//! - `api`: 认证请求网关
//! - `components`: UI 组件层

mod api;
mod auth;
mod components {
    pub mod dashboard;
    mod icons;
    pub mod login;
    pub mod signup;
}
mod config;
mod notify;
mod protocol;

use crate::auth::{AuthContext, init_auth};
use crate::components::dashboard::DashboardPage;
use crate::components::login::LoginPage;
use crate::components::signup::SignupPage;
use crate::notify::{NoticeToast, NotifyContext};

use leptos::prelude::*;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，
// 所有对 window/history/storage 的直接访问都集中在这里。
pub(crate) mod web {
    pub mod route;
    pub mod router;
    mod storage;

    pub use storage::LocalStorage;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Signup => view! { <SignupPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 2. 初始化认证状态（从 Token Store 恢复会话）
    init_auth(&auth_ctx);

    // 3. 全局通知上下文：挂在路由出口之外，跨页面切换存活
    let notify_ctx = NotifyContext::new();
    provide_context(notify_ctx);

    // 4. 获取认证状态信号，用于注入路由服务（解耦！）
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        // 5. 路由器组件：注入认证信号实现守卫
        <Router is_authenticated=is_authenticated>
            <NoticeToast />
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
