use leptos::prelude::*;
use leptos_icons::*;

#[component]
pub fn Spinner() -> impl IntoView {
    view! {
        <Icon attr:class="inline-block mr-2 w-4 h-4 animate-spin" icon=icondata::AiLoadingOutlined />
    }
}

#[component]
pub fn FullScreenSpinner(#[prop(into)] text: String) -> impl IntoView {
    view! {
        <div class="flex flex-col gap-4 justify-center items-center w-dvw h-dvh bg-black text-white">
            <Icon attr:class="w-10 h-10 animate-spin" icon=icondata::AiLoadingOutlined />
            <span class="text-neutral-300">{text}</span>
        </div>
    }
}
