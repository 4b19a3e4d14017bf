use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{ParkingLot, use_api};
use crate::web::router::use_router;

#[component]
pub fn ParkingLotsPage() -> impl IntoView {
    let api = use_api();
    let router = use_router();

    let (lots, set_lots) = signal(Vec::<ParkingLot>::new());
    let (loading, set_loading) = signal(true);
    let (vehicle_number, set_vehicle_number) = signal(String::new());
    let (notice, set_notice) = signal(Option::<(String, bool)>::None); // 消息内容, 是否出错

    let load_lots = {
        let api = api.clone();
        move || {
            let api = api.clone();
            set_loading.set(true);
            spawn_local(async move {
                match api.parking_lots().await {
                    Ok(data) => set_lots.set(data),
                    Err(e) => set_notice.set(Some((format!("Failed to load lots: {}", e), true))),
                }
                set_loading.set(false);
            });
        }
    };

    // 初始加载
    {
        let load_lots = load_lots.clone();
        Effect::new(move |_| {
            load_lots();
        });
    }

    let on_book = {
        let api = api.clone();
        let load_lots = load_lots.clone();
        move |lot_id: i64| {
            let api = api.clone();
            let load_lots = load_lots.clone();
            let vehicle = vehicle_number.get_untracked();
            if vehicle.is_empty() {
                set_notice.set(Some(("Enter a vehicle number first".to_string(), true)));
                return;
            }
            spawn_local(async move {
                match api.book_parking(lot_id, &vehicle).await {
                    Ok(()) => {
                        set_notice.set(Some(("Booking successful".to_string(), false)));
                        load_lots();
                    }
                    Err(e) => set_notice.set(Some((format!("Booking failed: {}", e), true))),
                }
            });
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 p-8">
            <div class="max-w-4xl mx-auto">
                <div class="flex items-center justify-between mb-6">
                    <h1 class="text-2xl font-bold">"Parking lots"</h1>
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

                <div class="form-control mb-6 max-w-xs">
                    <label class="label" for="vehicle">
                        <span class="label-text">"Vehicle number"</span>
                    </label>
                    <input
                        id="vehicle"
                        type="text"
                        placeholder="KA01AB1234"
                        on:input=move |ev| set_vehicle_number.set(event_target_value(&ev))
                        prop:value=vehicle_number
                        class="input input-bordered"
                    />
                </div>

                <Show
                    when=move || !loading.get()
                    fallback=|| view! { <span class="loading loading-spinner loading-lg"></span> }
                >
                    <div class="grid gap-4 md:grid-cols-2">
                        <For
                            each=move || lots.get()
                            key=|lot| lot.id
                            children={
                                let on_book = on_book.clone();
                                move |lot: ParkingLot| {
                                    let on_book = on_book.clone();
                                    let lot_id = lot.id;
                                    view! {
                                        <div class="card bg-base-100 shadow">
                                            <div class="card-body">
                                                <h2 class="card-title">{lot.prime_location_name.clone()}</h2>
                                                <p class="text-base-content/70">{lot.address.clone()}</p>
                                                <p>
                                                    {format!("{} free of {} · ₹{}/h",
                                                        lot.available_spots, lot.number_of_spots, lot.price)}
                                                </p>
                                                <div class="card-actions justify-end">
                                                    <button
                                                        class="btn btn-primary btn-sm"
                                                        disabled=lot.available_spots == 0
                                                        on:click=move |_| on_book(lot_id)
                                                    >
                                                        "Book a spot"
                                                    </button>
                                                </div>
                                            </div>
                                        </div>
                                    }
                                }
                            }
                        />
                    </div>
                </Show>
            </div>
        </div>
    }
}
