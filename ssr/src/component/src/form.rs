use leptos::prelude::*;

const INPUT_CLASSES: &str = "p-3 w-full rounded-lg border transition outline-none focus:border-pink-400 focus:ring-pink-400 bg-neutral-900 border-neutral-800 text-[15px] placeholder:text-neutral-500 placeholder:font-light";

#[component]
pub fn ErrorText(#[prop(into)] error: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || error.with(Option::is_some)>
            <span class="text-sm text-red-500">{move || error.get().unwrap_or_default()}</span>
        </Show>
    }
}

/// Labelled single-line input bound to `value`, with its error rendered above it
#[component]
pub fn InputField(
    #[prop(into)] id: String,
    #[prop(into)] label: String,
    value: RwSignal<String>,
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    view! {
        <div class="flex flex-col gap-y-1">
            <label for=id.clone() class="mb-1 font-light text-[18px] text-neutral-300">
                {label}
            </label>
            <ErrorText error />
            <input
                id=id
                type=input_type
                class=INPUT_CLASSES
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </div>
    }
}

#[component]
pub fn TextAreaField(
    #[prop(into)] id: String,
    #[prop(into)] label: String,
    value: RwSignal<String>,
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(default = 6)] rows: u32,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    view! {
        <div class="flex flex-col gap-y-1">
            <label for=id.clone() class="mb-1 font-light text-[18px] text-neutral-300">
                {label}
            </label>
            <ErrorText error />
            <textarea
                id=id
                rows=rows
                class=INPUT_CLASSES
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            ></textarea>
        </div>
    }
}
