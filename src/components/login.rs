use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::web::router::use_router;

#[component]
pub fn LoginPage() -> impl IntoView {
    let api = use_api();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = {
        let api = api.clone();
        let router = router.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            if email.get().is_empty() || password.get().is_empty() {
                set_error_msg.set(Some("Please fill in all fields".to_string()));
                return;
            }

            set_is_submitting.set(true);
            set_error_msg.set(None);

            let api = api.clone();
            let router = router.clone();
            spawn_local(async move {
                match api.login(&email.get_untracked(), &password.get_untracked()).await {
                    // 按角色选择落地页
                    Ok(user) if user.is_admin => router.navigate("/admin"),
                    Ok(_) => router.navigate("/dashboard"),
                    Err(_) => {
                        set_error_msg.set(Some("Invalid email or password".to_string()));
                    }
                }
                set_is_submitting.set(false);
            });
        }
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"ParkSpot"</h1>
                    <p class="text-base-content/70">"Sign in to manage your parking"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="you@example.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Sign in".into_any()
                                }}
                            </button>
                        </div>
                        <div class="text-center text-sm mt-2">
                            <a
                                class="link link-primary"
                                on:click={
                                    let router = router.clone();
                                    move |_| router.navigate("/register")
                                }
                            >
                                "No account yet? Register"
                            </a>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
