use leptos::prelude::*;

use crate::web::router::use_router;

/// 公开首页：不触发任何会话查询
#[component]
pub fn HomePage() -> impl IntoView {
    let router = use_router();

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content text-center">
                <div class="max-w-md">
                    <h1 class="text-5xl font-bold">"ParkSpot"</h1>
                    <p class="py-6 text-base-content/70">
                        "Find, book and release parking spots across the city."
                    </p>
                    <div class="flex gap-4 justify-center">
                        <button
                            class="btn btn-primary"
                            on:click={
                                let router = router.clone();
                                move |_| router.navigate("/login")
                            }
                        >
                            "Sign in"
                        </button>
                        <button
                            class="btn btn-outline"
                            on:click={
                                let router = router.clone();
                                move |_| router.navigate("/register")
                            }
                        >
                            "Register"
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
