//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"请求 -> 守卫评估 -> 应用决策"的导航流程。
//!
//! 并发规则：路由服务持有一个单调递增的导航代数计数器。
//! 每次新导航和每次观察者强制跳转都会递增它；
//! 守卫决策返回时若代数已过期则被静默丢弃，保证最新意图确定性胜出。

use std::cell::Cell;
use std::rc::Rc;

use leptos::prelude::*;
use send_wrapper::SendWrapper;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::route::{AccessRequirement, AppRoute};
use crate::guard::{GuardDecision, NavigationGuard, NavigationIntent};
use crate::session::SessionResolver;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 守卫所需的会话解析器在构造时注入，实现与网络层的解耦。
/// 非 Signal 字段用 `SendWrapper` 包装以满足 Context 的
/// `Send + Sync` 约束（CSR 单线程，包装不会跨线程解引用）。
#[derive(Clone)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 会话解析器（注入，按导航评估使用，从不缓存结果）
    resolver: SendWrapper<Rc<dyn SessionResolver>>,
    /// 导航代数计数器
    generation: SendWrapper<Rc<Cell<u64>>>,
}

impl RouterService {
    /// 创建新的路由服务
    ///
    /// # Arguments
    /// * `resolver` - 会话解析器，由外部注入实现解耦
    fn new(resolver: Rc<dyn SessionResolver>) -> Self {
        // 初始化当前路由（从 URL 解析）
        let path = current_path();
        let initial_route = AppRoute::from_path(&path);
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            resolver: SendWrapper::new(resolver),
            generation: SendWrapper::new(Rc::new(Cell::new(0))),
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 递增导航代数并返回新令牌
    fn next_generation(&self) -> u64 {
        let token = self.generation.get() + 1;
        self.generation.set(token);
        token
    }

    /// 令牌是否仍是最新代数
    fn is_current(&self, token: u64) -> bool {
        self.generation.get() == token
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 守卫评估 -> 应用决策
    pub fn navigate(&self, path: &str) {
        let target_route = AppRoute::from_path(path);
        self.navigate_to_route(target_route, true);
    }

    /// 导航到指定路由
    ///
    /// 公开路由同步放行；受保护路由生成一个本地任务等待守卫,
    /// 决策返回时若导航代数已过期则丢弃（慢的会话查询不得
    /// 把用户重定向到一个早已放弃的目的地）。
    ///
    /// # Arguments
    /// * `target_route` - 目标路由
    /// * `use_push` - true 使用 pushState, false 使用 replaceState
    fn navigate_to_route(&self, target_route: AppRoute, use_push: bool) {
        let token = self.next_generation();
        let intent = NavigationIntent {
            target: target_route,
            origin: self.current_route.get_untracked(),
        };

        // 公开路由不挂起，直接放行（守卫对 Public 不做会话查询）
        if intent.target.access() == AccessRequirement::Public {
            self.apply(GuardDecision::Proceed(intent.target), use_push);
            return;
        }

        let this = self.clone();
        spawn_local(async move {
            let guard = NavigationGuard::new(&**this.resolver);
            let decision = guard.evaluate(&intent).await;

            if !this.is_current(token) {
                web_sys::console::log_1(&"[Router] Stale navigation decision discarded.".into());
                return;
            }

            if let GuardDecision::Redirect(to) = decision {
                web_sys::console::log_1(
                    &format!(
                        "[Router] Access denied: {} -> {}. Redirecting to {}.",
                        intent.origin, intent.target, to
                    )
                    .into(),
                );
            }
            this.apply(decision, use_push);
        });
    }

    /// 应用守卫决策：更新 History 并驱动界面
    fn apply(&self, decision: GuardDecision, use_push: bool) {
        let route = match decision {
            GuardDecision::Proceed(route) => route,
            GuardDecision::Redirect(route) => route,
        };
        if use_push {
            push_history_state(route.to_path());
        } else {
            replace_history_state(route.to_path());
        }
        self.set_route.set(route);
    }

    /// **强制跳转登录**
    ///
    /// 由响应观察者在观察到会话失效时调用，独立于任何待决导航。
    pub fn force_login_redirect(&self) {
        self.invalidate_to_login();
        web_sys::console::log_1(&"[Router] Session invalidated. Redirecting to Login.".into());
        replace_history_state(AppRoute::Login.to_path());
    }

    /// 作废在途守卫决策并把路由信号切到登录页
    ///
    /// 递增代数使任何待决守卫决策过期：最后表达的意图胜出。
    /// 不触碰 History 与控制台，浏览器侧副作用留在调用方。
    fn invalidate_to_login(&self) {
        self.next_generation();
        self.set_route.set(AppRoute::Login);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let this = self.clone();

        let closure = Closure::<dyn Fn()>::new(move || {
            let target_route = AppRoute::from_path(&current_path());
            // popstate 时 URL 已经变更，守卫评估后用 replaceState 修正
            this.navigate_to_route(target_route, false);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }
}

/// 提供路由服务到 Context 并初始化
pub fn provide_router(resolver: Rc<dyn SessionResolver>) -> RouterService {
    let router = RouterService::new(resolver);

    router.init_popstate_listener();

    provide_context(router.clone());
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure the router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{ResolverError, SessionInfo};
    use async_trait::async_trait;

    struct StubResolver;

    #[async_trait(?Send)]
    impl SessionResolver for StubResolver {
        async fn resolve(&self) -> Result<SessionInfo, ResolverError> {
            Err(ResolverError::Network("stub".into()))
        }
    }

    fn service() -> RouterService {
        let (current_route, set_route) = signal(AppRoute::Home);
        RouterService {
            current_route,
            set_route,
            resolver: SendWrapper::new(Rc::new(StubResolver)),
            generation: SendWrapper::new(Rc::new(Cell::new(0))),
        }
    }

    /// 路由服务要放进 Leptos Context，必须满足 `Send + Sync + Clone`
    #[test]
    fn test_router_service_satisfies_context_bounds() {
        fn assert_context_ready<T: Send + Sync + Clone + 'static>() {}
        assert_context_ready::<RouterService>();
    }

    #[test]
    fn test_generation_is_monotonic() {
        let router = service();
        let first = router.next_generation();
        let second = router.next_generation();
        assert!(second > first);
    }

    #[test]
    fn test_new_navigation_invalidates_pending_token() {
        let router = service();

        // 第一次导航取得令牌，第二次导航使其作废
        let pending = router.next_generation();
        assert!(router.is_current(pending));

        let newer = router.next_generation();
        assert!(!router.is_current(pending));
        assert!(router.is_current(newer));
    }

    #[test]
    fn test_forced_login_redirect_defeats_pending_decision() {
        let router = service();

        // 一次受保护导航在途，此时观察者触发强制跳转
        let pending = router.next_generation();
        router.invalidate_to_login();

        // 在途决策已过期，路由落在登录页
        assert!(!router.is_current(pending));
        assert_eq!(router.current_route().get_untracked(), AppRoute::Login);
    }
}
