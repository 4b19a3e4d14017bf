use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::web::router::use_router;

/// 用户面板：受保护路由的落地页，也是角色不足时的重定向目标
#[component]
pub fn UserDashboardPage() -> impl IntoView {
    let api = use_api();
    let router = use_router();

    let on_logout = {
        let api = api.clone();
        let router = router.clone();
        move |_| {
            let api = api.clone();
            let router = router.clone();
            spawn_local(async move {
                // 注销失败也照样回登录页，会话已不可信
                let _ = api.logout().await;
                router.navigate("/login");
            });
        }
    };

    view! {
        <div class="min-h-screen bg-base-200">
            <div class="navbar bg-base-100 shadow">
                <div class="flex-1">
                    <span class="text-xl font-bold px-4">"My Parking"</span>
                </div>
                <div class="flex-none px-4">
                    <button class="btn btn-ghost btn-sm" on:click=on_logout>"Log out"</button>
                </div>
            </div>

            <div class="p-8 grid gap-4 md:grid-cols-2 max-w-3xl mx-auto">
                <button
                    class="card bg-base-100 shadow hover:shadow-lg p-8 text-left"
                    on:click={
                        let router = router.clone();
                        move |_| router.navigate("/parking-lots")
                    }
                >
                    <h2 class="card-title">"Parking lots"</h2>
                    <p class="text-base-content/70">"Browse availability and book a spot"</p>
                </button>
                <button
                    class="card bg-base-100 shadow hover:shadow-lg p-8 text-left"
                    on:click={
                        let router = router.clone();
                        move |_| router.navigate("/my-reservations")
                    }
                >
                    <h2 class="card-title">"My reservations"</h2>
                    <p class="text-base-content/70">"Active and past bookings"</p>
                </button>
            </div>
        </div>
    }
}
