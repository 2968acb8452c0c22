use consts::{APP_NAME, HOME_PATH};
use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::components::A;

#[component]
pub fn NotFound() -> impl IntoView {
    #[cfg(feature = "ssr")]
    {
        let resp = expect_context::<leptos_axum::ResponseOptions>();
        resp.set_status(http::StatusCode::NOT_FOUND);
    }

    view! {
        <Title text=format!("{APP_NAME} - Not found") />
        <div class="flex flex-col gap-4 justify-center items-center text-white bg-black w-dvw h-dvh">
            <h1 class="text-[32px] font-light">Page not found</h1>
            <A href=HOME_PATH attr:class="text-pink-400">"Back to uploads"</A>
        </div>
    }
}
