//! 导航守卫模块 - 核心状态机
//!
//! 每个导航意图经历一次评估：查路由表 → 公开则放行 →
//! 否则等待会话解析 → 根据角色得出终态。守卫本身是纯逻辑，
//! 不接触 DOM 和 History，决策由路由服务应用。
//!
//! 解析失败（网络、拒绝、坏载荷）一律折叠为"未登录"，
//! 用户永远不会看到错误提示，只会落到另一个页面。

use crate::session::SessionResolver;
use crate::web::route::{AccessRequirement, AppRoute};

/// 一次待决的导航转换，恰好被守卫消费一次
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationIntent {
    pub target: AppRoute,
    pub origin: AppRoute,
}

/// 守卫评估的终态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// 公开路由，未做会话查询
    Allowed,
    /// 已认证且角色满足要求
    AllowedAuthenticated,
    /// 已认证但路由要求管理员而调用者不是
    DeniedRole,
    /// 会话解析失败
    DeniedUnauthenticated,
}

/// 守卫对导航意图的裁决
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// 放行至目标路由
    Proceed(AppRoute),
    /// 重定向至其他路由
    Redirect(AppRoute),
}

impl GuardOutcome {
    /// 将终态映射为动作
    pub fn decision(self, target: AppRoute) -> GuardDecision {
        match self {
            GuardOutcome::Allowed | GuardOutcome::AllowedAuthenticated => {
                GuardDecision::Proceed(target)
            }
            GuardOutcome::DeniedRole => GuardDecision::Redirect(AppRoute::role_failure_redirect()),
            GuardOutcome::DeniedUnauthenticated => {
                GuardDecision::Redirect(AppRoute::auth_failure_redirect())
            }
        }
    }
}

/// 导航守卫
///
/// 只在单次评估的作用域内存在，借用注入的会话解析器。
pub struct NavigationGuard<'a> {
    resolver: &'a dyn SessionResolver,
}

impl<'a> NavigationGuard<'a> {
    pub fn new(resolver: &'a dyn SessionResolver) -> Self {
        Self { resolver }
    }

    /// 评估一个导航意图
    ///
    /// 公开路由短路放行，绝不触发会话查询；
    /// 受保护路由等待一次解析，失败折叠为未登录。
    pub async fn evaluate(&self, intent: &NavigationIntent) -> GuardDecision {
        let outcome = match intent.target.access() {
            AccessRequirement::Public => GuardOutcome::Allowed,
            requirement => match self.resolver.resolve().await {
                Err(_) => GuardOutcome::DeniedUnauthenticated,
                // 解析成功但端点报告未认证，同样按无会话处理
                Ok(session) if !session.is_authenticated => GuardOutcome::DeniedUnauthenticated,
                Ok(session) => {
                    if requirement == AccessRequirement::RequiresAdmin && !session.is_admin {
                        GuardOutcome::DeniedRole
                    } else {
                        GuardOutcome::AllowedAuthenticated
                    }
                }
            },
        };
        outcome.decision(intent.target)
    }
}

// =========================================================
// 单元测试 (Unit Tests)
// =========================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{ResolverError, SessionInfo};
    use async_trait::async_trait;
    use std::cell::RefCell;

    /// Scripted resolver outcome for a mock invocation
    #[derive(Clone, Copy)]
    enum MockOutcome {
        User { is_admin: bool },
        Anonymous,
        NetworkFailure,
        Denied(u16),
        Malformed,
    }

    /// Mock resolver that counts invocations
    struct MockResolver {
        outcome: MockOutcome,
        calls: RefCell<u32>,
    }

    impl MockResolver {
        fn new(outcome: MockOutcome) -> Self {
            Self {
                outcome,
                calls: RefCell::new(0),
            }
        }

        fn call_count(&self) -> u32 {
            *self.calls.borrow()
        }
    }

    #[async_trait(?Send)]
    impl SessionResolver for MockResolver {
        async fn resolve(&self) -> Result<SessionInfo, ResolverError> {
            *self.calls.borrow_mut() += 1;
            match self.outcome {
                MockOutcome::User { is_admin } => Ok(SessionInfo {
                    is_authenticated: true,
                    is_admin,
                }),
                MockOutcome::Anonymous => Ok(SessionInfo {
                    is_authenticated: false,
                    is_admin: false,
                }),
                MockOutcome::NetworkFailure => {
                    Err(ResolverError::Network("connection refused".into()))
                }
                MockOutcome::Denied(status) => Err(ResolverError::Denied(status)),
                MockOutcome::Malformed => Err(ResolverError::Malformed("unexpected shape".into())),
            }
        }
    }

    fn intent(target: AppRoute) -> NavigationIntent {
        NavigationIntent {
            target,
            origin: AppRoute::Home,
        }
    }

    // Scenario A: admin target, authenticated non-admin -> dashboard
    #[tokio::test]
    async fn test_non_admin_on_admin_route_redirects_to_dashboard() {
        let resolver = MockResolver::new(MockOutcome::User { is_admin: false });
        let guard = NavigationGuard::new(&resolver);

        let decision = guard.evaluate(&intent(AppRoute::AdminDashboard)).await;

        assert_eq!(decision, GuardDecision::Redirect(AppRoute::UserDashboard));
        assert_eq!(resolver.call_count(), 1);
    }

    // Scenario B: admin target, authenticated admin -> proceed
    #[tokio::test]
    async fn test_admin_on_admin_route_proceeds() {
        let resolver = MockResolver::new(MockOutcome::User { is_admin: true });
        let guard = NavigationGuard::new(&resolver);

        let decision = guard.evaluate(&intent(AppRoute::AdminDashboard)).await;

        assert_eq!(decision, GuardDecision::Proceed(AppRoute::AdminDashboard));
        assert_eq!(resolver.call_count(), 1);
    }

    // Scenario C: guarded target, resolver network failure -> login
    #[tokio::test]
    async fn test_resolver_failure_redirects_to_login() {
        let resolver = MockResolver::new(MockOutcome::NetworkFailure);
        let guard = NavigationGuard::new(&resolver);

        let decision = guard.evaluate(&intent(AppRoute::UserDashboard)).await;

        assert_eq!(decision, GuardDecision::Redirect(AppRoute::Login));
        assert_eq!(resolver.call_count(), 1);
    }

    // Scenario D: public target -> proceed, zero resolver invocations
    #[tokio::test]
    async fn test_public_route_never_queries_session() {
        let resolver = MockResolver::new(MockOutcome::User { is_admin: true });
        let guard = NavigationGuard::new(&resolver);

        for route in [
            AppRoute::Home,
            AppRoute::Login,
            AppRoute::Register,
            AppRoute::NotFound,
        ] {
            let decision = guard.evaluate(&intent(route)).await;
            assert_eq!(decision, GuardDecision::Proceed(route));
        }

        assert_eq!(resolver.call_count(), 0);
    }

    // Every resolver failure flavor collapses to Redirect(login),
    // for both guarded access levels
    #[tokio::test]
    async fn test_all_failures_collapse_to_login() {
        for outcome in [
            MockOutcome::NetworkFailure,
            MockOutcome::Denied(401),
            MockOutcome::Denied(500),
            MockOutcome::Malformed,
        ] {
            for target in [AppRoute::UserDashboard, AppRoute::AdminDashboard] {
                let resolver = MockResolver::new(outcome);
                let guard = NavigationGuard::new(&resolver);

                let decision = guard.evaluate(&intent(target)).await;
                assert_eq!(decision, GuardDecision::Redirect(AppRoute::Login));
            }
        }
    }

    // A success payload that reports no authenticated user behaves
    // like a resolver failure
    #[tokio::test]
    async fn test_unauthenticated_session_redirects_to_login() {
        let resolver = MockResolver::new(MockOutcome::Anonymous);
        let guard = NavigationGuard::new(&resolver);

        let decision = guard.evaluate(&intent(AppRoute::UserDashboard)).await;
        assert_eq!(decision, GuardDecision::Redirect(AppRoute::Login));
    }

    // Auth-only route accepts both roles
    #[tokio::test]
    async fn test_auth_route_accepts_any_role() {
        for is_admin in [false, true] {
            let resolver = MockResolver::new(MockOutcome::User { is_admin });
            let guard = NavigationGuard::new(&resolver);

            let decision = guard.evaluate(&intent(AppRoute::MyReservations)).await;
            assert_eq!(decision, GuardDecision::Proceed(AppRoute::MyReservations));
        }
    }

    // Idempotence: same intent, unchanged resolver outcome, same decision
    #[tokio::test]
    async fn test_evaluation_is_idempotent() {
        let resolver = MockResolver::new(MockOutcome::User { is_admin: false });
        let guard = NavigationGuard::new(&resolver);
        let intent = intent(AppRoute::AdminDashboard);

        let first = guard.evaluate(&intent).await;
        let second = guard.evaluate(&intent).await;

        assert_eq!(first, second);
        // 两次评估即两次查询：会话从不跨导航缓存
        assert_eq!(resolver.call_count(), 2);
    }
}
