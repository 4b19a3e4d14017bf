use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{Reservation, use_api};
use crate::web::router::use_router;

#[component]
pub fn MyReservationsPage() -> impl IntoView {
    let api = use_api();
    let router = use_router();

    let (reservations, set_reservations) = signal(Vec::<Reservation>::new());
    let (loading, set_loading) = signal(true);
    let (notice, set_notice) = signal(Option::<(String, bool)>::None);

    let load = {
        let api = api.clone();
        move || {
            let api = api.clone();
            set_loading.set(true);
            spawn_local(async move {
                match api.my_reservations().await {
                    Ok(data) => set_reservations.set(data),
                    Err(e) => {
                        set_notice.set(Some((format!("Failed to load reservations: {}", e), true)));
                    }
                }
                set_loading.set(false);
            });
        }
    };

    {
        let load = load.clone();
        Effect::new(move |_| {
            load();
        });
    }

    let on_release = {
        let api = api.clone();
        let load = load.clone();
        move |reservation_id: i64| {
            let api = api.clone();
            let load = load.clone();
            spawn_local(async move {
                match api.release_parking(reservation_id).await {
                    Ok(()) => {
                        set_notice.set(Some(("Spot released".to_string(), false)));
                        load();
                    }
                    Err(e) => set_notice.set(Some((format!("Release failed: {}", e), true))),
                }
            });
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 p-8">
            <div class="max-w-4xl mx-auto">
                <div class="flex items-center justify-between mb-6">
                    <h1 class="text-2xl font-bold">"My reservations"</h1>
                    <button
                        class="btn btn-ghost btn-sm"
                        on:click={
                            let router = router.clone();
                            move |_| router.navigate("/dashboard")
                        }
                    >
                        "Back"
                    </button>
                </div>

                <Show when=move || notice.get().is_some()>
                    {move || {
                        let (msg, is_error) = notice.get().unwrap_or_default();
                        let class = if is_error { "alert alert-error mb-4" } else { "alert alert-success mb-4" };
                        view! { <div role="alert" class=class><span>{msg}</span></div> }
                    }}
                </Show>

                <Show
                    when=move || !loading.get()
                    fallback=|| view! { <span class="loading loading-spinner loading-lg"></span> }
                >
                    <div class="overflow-x-auto bg-base-100 rounded-box shadow">
                        <table class="table">
                            <thead>
                                <tr>
                                    <th>"Lot"</th>
                                    <th>"Vehicle"</th>
                                    <th>"Since"</th>
                                    <th>"Duration"</th>
                                    <th>"Cost"</th>
                                    <th>"Status"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || reservations.get()
                                    key=|r| r.id
                                    children={
                                        let on_release = on_release.clone();
                                        move |r: Reservation| {
                                            let on_release = on_release.clone();
                                            let id = r.id;
                                            let active = r.status == "active";
                                            view! {
                                                <tr>
                                                    <td>{r.lot_name.clone()}</td>
                                                    <td>{r.vehicle_number.clone()}</td>
                                                    <td>{r.parking_timestamp.clone()}</td>
                                                    <td>{r.duration_display.clone()}</td>
                                                    <td>{format!("₹{:.2}", r.parking_cost)}</td>
                                                    <td>{r.status.clone()}</td>
                                                    <td>
                                                        <Show when=move || active>
                                                            <button
                                                                class="btn btn-warning btn-xs"
                                                                on:click={
                                                                    let on_release = on_release.clone();
                                                                    move |_| on_release(id)
                                                                }
                                                            >
                                                                "Release"
                                                            </button>
                                                        </Show>
                                                    </td>
                                                </tr>
                                            }
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
