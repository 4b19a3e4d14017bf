use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{RegisterRequest, use_api};
use crate::web::router::use_router;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let api = use_api();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (full_name, set_full_name) = signal(String::new());
    let (phone, set_phone) = signal(String::new());
    let (address, set_address) = signal(String::new());
    let (pin_code, set_pin_code) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if email.get().is_empty() || password.get().is_empty() || full_name.get().is_empty() {
            set_error_msg.set(Some("Email, password and full name are required".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let api = api.clone();
        let router = router.clone();
        spawn_local(async move {
            let req = RegisterRequest {
                email: email.get_untracked(),
                password: password.get_untracked(),
                full_name: full_name.get_untracked(),
                phone: phone.get_untracked(),
                address: address.get_untracked(),
                pin_code: pin_code.get_untracked(),
            };
            match api.register(&req).await {
                Ok(()) => router.navigate("/login"),
                Err(_) => set_error_msg.set(Some("Registration failed. Try again.".to_string())),
            }
            set_is_submitting.set(false);
        });
    };

    let text_input = move |id: &'static str,
                           label: &'static str,
                           input_type: &'static str,
                           value: ReadSignal<String>,
                           setter: WriteSignal<String>| {
        view! {
            <div class="form-control">
                <label class="label" for=id>
                    <span class="label-text">{label}</span>
                </label>
                <input
                    id=id
                    type=input_type
                    on:input=move |ev| setter.set(event_target_value(&ev))
                    prop:value=value
                    class="input input-bordered"
                />
            </div>
        }
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold mb-4">"Create your account"</h1>
                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        {text_input("email", "Email", "email", email, set_email)}
                        {text_input("password", "Password", "password", password, set_password)}
                        {text_input("full_name", "Full name", "text", full_name, set_full_name)}
                        {text_input("phone", "Phone", "tel", phone, set_phone)}
                        {text_input("address", "Address", "text", address, set_address)}
                        {text_input("pin_code", "PIN code", "text", pin_code, set_pin_code)}

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Registering..." }.into_any()
                                } else {
                                    "Register".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
