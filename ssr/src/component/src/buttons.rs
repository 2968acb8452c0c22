use leptos::prelude::*;

use crate::spinner::Spinner;

const BASE_CLASSES: &str = "w-full py-3 px-5 rounded-xl text-white font-light text-[17px] transition disabled:opacity-60 disabled:cursor-not-allowed";

#[component]
pub fn HighlightedButton(
    children: Children,
    on_click: impl Fn() + 'static,
    #[prop(optional)] classes: String,
    #[prop(into, default = Signal::stored(false))] disabled: Signal<bool>,
    #[prop(into, default = Signal::stored(false))] loading: Signal<bool>,
) -> impl IntoView {
    view! {
        <button
            class=format!("{BASE_CLASSES} bg-linear-to-r from-pink-300 to-pink-500 {classes}")
            disabled=move || disabled.get() || loading.get()
            on:click=move |_| on_click()
        >
            <Show when=move || loading.get()>
                <Spinner />
            </Show>
            {children()}
        </button>
    }
}

/// Outlined button, for secondary actions next to a [`HighlightedButton`]
#[component]
pub fn SecondaryButton(
    children: Children,
    on_click: impl Fn() + 'static,
    #[prop(optional)] classes: String,
) -> impl IntoView {
    view! {
        <button
            class=format!("px-6 py-2 rounded-lg border border-pink-400 text-pink-400 font-medium text-[15px] hover:bg-pink-400 hover:text-white transition-colors {classes}")
            on:click=move |_| on_click()
        >
            {children()}
        </button>
    }
}
