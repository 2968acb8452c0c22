use consts::HOME_PATH;
use leptos::prelude::*;
use leptos_router::components::Redirect;

#[component]
pub fn RootPage() -> impl IntoView {
    view! { <Redirect path=HOME_PATH /> }
}
