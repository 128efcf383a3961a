//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、各自的访问约束，以及守卫的重定向决策。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面 (默认路由)
    #[default]
    Login,
    /// 注册页面
    Signup,
    /// 分析面板 (需要认证)
    Dashboard,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" => Self::Dashboard,
            "/login" => Self::Login,
            "/signup" => Self::Signup,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Dashboard => "/",
            Self::Login => "/login",
            Self::Signup => "/signup",
            Self::NotFound => "/404",
        }
    }

    /// 该路由是否需要认证
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Dashboard)
    }

    /// 已认证用户是否应离开此路由（登录/注册页）
    pub fn redirects_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Signup)
    }

    /// **核心守卫决策**：给定目标路由与认证状态，返回实际应加载的路由
    ///
    /// - 未认证访问受保护路由 => 登录页
    /// - 已认证访问登录/注册页 => 面板
    /// - 其余情况按原目标加载
    ///
    /// 每次导航、每次 popstate、以及认证状态变化时都会重新求值，
    /// 决策从不被缓存。
    pub fn guarded(target: Self, is_authenticated: bool) -> Self {
        if target.requires_auth() && !is_authenticated {
            return Self::Login;
        }
        if target.redirects_when_authenticated() && is_authenticated {
            return Self::Dashboard;
        }
        target
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_paths_resolve_and_round_trip() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/signup"), AppRoute::Signup);
        for route in [AppRoute::Dashboard, AppRoute::Login, AppRoute::Signup] {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
    }

    #[test]
    fn unknown_paths_fall_back_to_not_found() {
        assert_eq!(AppRoute::from_path("/settings"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path(""), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/login/extra"), AppRoute::NotFound);
    }

    #[test]
    fn dashboard_renders_iff_session_present() {
        assert_eq!(
            AppRoute::guarded(AppRoute::Dashboard, false),
            AppRoute::Login
        );
        assert_eq!(
            AppRoute::guarded(AppRoute::Dashboard, true),
            AppRoute::Dashboard
        );
    }

    #[test]
    fn auth_pages_bounce_logged_in_users_to_dashboard() {
        assert_eq!(AppRoute::guarded(AppRoute::Login, true), AppRoute::Dashboard);
        assert_eq!(
            AppRoute::guarded(AppRoute::Signup, true),
            AppRoute::Dashboard
        );
        assert_eq!(AppRoute::guarded(AppRoute::Login, false), AppRoute::Login);
        assert_eq!(AppRoute::guarded(AppRoute::Signup, false), AppRoute::Signup);
    }

    #[test]
    fn not_found_is_public() {
        assert_eq!(
            AppRoute::guarded(AppRoute::NotFound, false),
            AppRoute::NotFound
        );
        assert_eq!(
            AppRoute::guarded(AppRoute::NotFound, true),
            AppRoute::NotFound
        );
    }
}
