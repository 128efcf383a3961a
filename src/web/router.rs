//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 导航流程：请求 -> 守卫决策 -> 写入 History -> 更新信号。

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 写入 History 状态
///
/// `replace` 为 true 时不产生新的历史记录，用于重定向与守卫修正。
fn write_history_state(path: &str, replace: bool) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = if replace {
                history.replace_state_with_url(&JsValue::NULL, "", Some(path))
            } else {
                history.push_state_with_url(&JsValue::NULL, "", Some(path))
            };
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入认证检查信号实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 认证状态检查（注入的信号，实现解耦）
    is_authenticated: Signal<bool>,
}

impl RouterService {
    /// 创建新的路由服务
    ///
    /// 初始路由同样要过守卫：覆盖刷新后直接落在受保护路径上的场景。
    fn new(is_authenticated: Signal<bool>) -> Self {
        let requested = AppRoute::from_path(&current_path());
        let initial = AppRoute::guarded(requested, is_authenticated.get_untracked());
        if initial != requested {
            write_history_state(initial.to_path(), true);
        }
        let (current_route, set_route) = signal(initial);

        Self {
            current_route,
            set_route,
            is_authenticated,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 守卫决策 -> 写入 History -> 更新信号
    pub fn navigate(&self, path: &str) {
        let target = AppRoute::from_path(path);
        let resolved = AppRoute::guarded(target, self.is_authenticated.get_untracked());
        if resolved != target {
            web_sys::console::log_1(
                &format!("[Router] {} blocked, redirecting to {}", target, resolved).into(),
            );
        }
        write_history_state(resolved.to_path(), false);
        self.set_route.set(resolved);
    }

    /// 初始化浏览器后退/前进按钮监听
    ///
    /// popstate 时重放守卫逻辑，阻止回退进入受保护页面。
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target = AppRoute::from_path(&current_path());
            let resolved = AppRoute::guarded(target, is_authenticated.get_untracked());
            if resolved != target {
                write_history_state(resolved.to_path(), true);
            }
            set_route.set(resolved);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 设置认证状态变化时的自动重定向
    ///
    /// 登录后自动离开登录/注册页，登出后自动离开受保护页面。
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;

        // 使用 Effect 监听认证状态变化
        Effect::new(move |_| {
            let is_auth = is_authenticated.get();
            let route = current_route.get_untracked();
            let resolved = AppRoute::guarded(route, is_auth);

            if resolved != route {
                web_sys::console::log_1(
                    &format!("[Router] Auth state changed, redirecting to {}", resolved).into(),
                );
                write_history_state(resolved.to_path(), false);
                set_route.set(resolved);
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);

    // 初始化监听器
    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 认证状态信号
    is_authenticated: Signal<bool>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    // 提供路由服务到 Context
    provide_router(is_authenticated);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}
