use component::spinner::FullScreenSpinner;
use consts::LOGIN_PATH;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use state::session::session_state;

#[component]
pub fn Logout() -> impl IntoView {
    let session = session_state();
    let navigate = use_navigate();

    Effect::new(move |_| {
        session.sign_out();
        navigate(LOGIN_PATH, Default::default());
    });

    view! { <FullScreenSpinner text="Logging out..." /> }
}
