//! ParkSpot 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由表（领域模型，含访问要求声明）
//! - `web::router`: 路由服务（核心引擎，守卫评估与代数计数）
//! - `web::http`: 显式构造的共享客户端（凭据模式 + 响应观察者列表）
//! - `session`: 会话解析（每次受保护导航查询一次，从不缓存）
//! - `guard`: 导航守卫状态机
//! - `watch`: 会话失效观察者（401 -> 强制登录跳转）
//! - `api` / `components`: 停车业务接口与 UI 组件层

use std::rc::Rc;

mod api;
mod guard;
mod session;
mod watch;

mod components {
    pub mod admin_dashboard;
    pub mod home;
    pub mod login;
    pub mod my_reservations;
    pub mod parking_lots;
    pub mod register;
    pub mod user_dashboard;
}

pub(crate) mod web {
    pub mod http;
    pub mod route;
    pub mod router;

    pub use http::ApiClient;
}

use leptos::prelude::*;

use crate::api::ParkApi;
use crate::components::admin_dashboard::AdminDashboardPage;
use crate::components::home::HomePage;
use crate::components::login::LoginPage;
use crate::components::my_reservations::MyReservationsPage;
use crate::components::parking_lots::ParkingLotsPage;
use crate::components::register::RegisterPage;
use crate::components::user_dashboard::UserDashboardPage;
use crate::session::{HttpSessionResolver, SessionResolver};
use crate::watch::install_unauthorized_watch;
use crate::web::ApiClient;
use crate::web::route::AppRoute;
use crate::web::router::{RouterOutlet, provide_router};

/// 后端基础 URL（进程级配置，启动时定下，此后只读）
const API_BASE_URL: &str = "http://localhost:5000";

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::AdminDashboard => view! { <AdminDashboardPage /> }.into_any(),
        AppRoute::UserDashboard => view! { <UserDashboardPage /> }.into_any(),
        AppRoute::ParkingLots => view! { <ParkingLotsPage /> }.into_any(),
        AppRoute::MyReservations => view! { <MyReservationsPage /> }.into_any(),
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
    // 1. 显式构造共享客户端（基础 URL + 携带会话 Cookie），此后只通过
    //    引用传递，观察者列表只追加
    let client = ApiClient::new(API_BASE_URL, true);

    // 2. 会话解析器，注入路由服务实现每导航一次的守卫评估
    let resolver: Rc<dyn SessionResolver> = Rc::new(HttpSessionResolver::new(client.clone()));
    let router = provide_router(resolver);

    // 3. 挂载会话失效观察者：任意请求收到 401 即强制跳转登录
    {
        let router = router.clone();
        install_unauthorized_watch(&client, move || router.force_login_redirect());
    }

    // 4. 业务 API 提供给组件层
    provide_context(ParkApi::new(client));

    view! { <RouterOutlet matcher=route_matcher /> }
}
