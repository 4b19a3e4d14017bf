//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其访问要求。

use std::fmt::Display;

/// 路由的访问要求
///
/// `RequiresAdmin` 在语义上蕴含 `RequiresAuth`：
/// 管理员路由首先是需要认证的路由。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessRequirement {
    /// 公开路由，无需会话查询
    Public,
    /// 需要有效会话
    RequiresAuth,
    /// 需要有效会话且为管理员
    RequiresAdmin,
}

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 首页 (默认路由)
    #[default]
    Home,
    /// 登录页面
    Login,
    /// 注册页面
    Register,
    /// 管理员面板 (仅限管理员)
    AdminDashboard,
    /// 用户面板 (需要认证)
    UserDashboard,
    /// 停车场列表 (需要认证)
    ParkingLots,
    /// 我的预约 (需要认证)
    MyReservations,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" => Self::Home,
            "/login" => Self::Login,
            "/register" => Self::Register,
            "/admin" => Self::AdminDashboard,
            "/dashboard" => Self::UserDashboard,
            "/parking-lots" => Self::ParkingLots,
            "/my-reservations" => Self::MyReservations,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::AdminDashboard => "/admin",
            Self::UserDashboard => "/dashboard",
            Self::ParkingLots => "/parking-lots",
            Self::MyReservations => "/my-reservations",
            Self::NotFound => "/404",
        }
    }

    /// **核心守卫元数据：每条路由声明一次访问要求**
    ///
    /// 枚举穷尽匹配保证不存在"未声明"的路由，
    /// 未匹配的路径落到 `NotFound`，视为公开页面。
    pub fn access(&self) -> AccessRequirement {
        match self {
            Self::Home | Self::Login | Self::Register | Self::NotFound => {
                AccessRequirement::Public
            }
            Self::UserDashboard | Self::ParkingLots | Self::MyReservations => {
                AccessRequirement::RequiresAuth
            }
            Self::AdminDashboard => AccessRequirement::RequiresAdmin,
        }
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取权限不足（非管理员访问管理员路由）时的重定向目标
    pub fn role_failure_redirect() -> Self {
        Self::UserDashboard
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
    fn test_path_round_trip() {
        let routes = [
            AppRoute::Home,
            AppRoute::Login,
            AppRoute::Register,
            AppRoute::AdminDashboard,
            AppRoute::UserDashboard,
            AppRoute::ParkingLots,
            AppRoute::MyReservations,
        ];
        for route in routes {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        assert_eq!(AppRoute::from_path("/does-not-exist"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path(""), AppRoute::NotFound);
    }

    #[test]
    fn test_access_declarations() {
        assert_eq!(AppRoute::Home.access(), AccessRequirement::Public);
        assert_eq!(AppRoute::Login.access(), AccessRequirement::Public);
        assert_eq!(AppRoute::Register.access(), AccessRequirement::Public);
        assert_eq!(AppRoute::NotFound.access(), AccessRequirement::Public);
        assert_eq!(
            AppRoute::UserDashboard.access(),
            AccessRequirement::RequiresAuth
        );
        assert_eq!(
            AppRoute::ParkingLots.access(),
            AccessRequirement::RequiresAuth
        );
        assert_eq!(
            AppRoute::MyReservations.access(),
            AccessRequirement::RequiresAuth
        );
        assert_eq!(
            AppRoute::AdminDashboard.access(),
            AccessRequirement::RequiresAdmin
        );
    }

    #[test]
    fn test_redirect_targets() {
        assert_eq!(AppRoute::auth_failure_redirect(), AppRoute::Login);
        assert_eq!(AppRoute::role_failure_redirect(), AppRoute::UserDashboard);
    }
}
