use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{ParkingLot, use_api};
use crate::web::router::use_router;

/// 管理员面板：仅管理员路由的落地页，非管理员会在守卫层被重定向
#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let api = use_api();
    let router = use_router();

    let (lots, set_lots) = signal(Vec::<ParkingLot>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    {
        let api = api.clone();
        Effect::new(move |_| {
            let api = api.clone();
            spawn_local(async move {
                match api.admin_parking_lots().await {
                    Ok(data) => set_lots.set(data),
                    Err(e) => set_error_msg.set(Some(format!("Failed to load lots: {}", e))),
                }
                set_loading.set(false);
            });
        });
    }

    let on_logout = {
        let api = api.clone();
        let router = router.clone();
        move |_| {
            let api = api.clone();
            let router = router.clone();
            spawn_local(async move {
                let _ = api.logout().await;
                router.navigate("/login");
            });
        }
    };

    view! {
        <div class="min-h-screen bg-base-200">
            <div class="navbar bg-base-100 shadow">
                <div class="flex-1">
                    <span class="text-xl font-bold px-4">"ParkSpot Admin"</span>
                </div>
                <div class="flex-none px-4">
                    <button class="btn btn-ghost btn-sm" on:click=on_logout>"Log out"</button>
                </div>
            </div>

            <div class="p-8 max-w-4xl mx-auto">
                <h1 class="text-2xl font-bold mb-6">"All parking lots"</h1>

                <Show when=move || error_msg.get().is_some()>
                    <div role="alert" class="alert alert-error mb-4">
                        <span>{move || error_msg.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <Show
                    when=move || !loading.get()
                    fallback=|| view! { <span class="loading loading-spinner loading-lg"></span> }
                >
                    <div class="overflow-x-auto bg-base-100 rounded-box shadow">
                        <table class="table">
                            <thead>
                                <tr>
                                    <th>"Location"</th>
                                    <th>"Address"</th>
                                    <th>"Price"</th>
                                    <th>"Occupancy"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || lots.get()
                                    key=|lot| lot.id
                                    children=|lot: ParkingLot| {
                                        view! {
                                            <tr>
                                                <td>{lot.prime_location_name.clone()}</td>
                                                <td>{lot.address.clone()}</td>
                                                <td>{format!("₹{}/h", lot.price)}</td>
                                                <td>
                                                    {format!("{}/{} occupied",
                                                        lot.occupied_spots, lot.number_of_spots)}
                                                </td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    </div>
                </Show>
            </div>
        </div>
    }
}
