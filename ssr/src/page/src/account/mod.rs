mod login;
mod signup;
pub mod validators;

pub use login::Login;
pub use signup::Signup;

use auth::{ErrorSetter, ErrorTag};
use component::form::ErrorText;
use consts::HOME_PATH;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use state::session::SessionState;

/// Records a failed check under `tag`, returns `true` if it failed
fn check(set_error: ErrorSetter, tag: ErrorTag, res: Result<(), String>) -> bool {
    match res {
        Ok(()) => false,
        Err(e) => {
            set_error.set(tag, e);
            true
        }
    }
}

/// Leaves the auth pages as soon as a session exists
fn go_home_when_signed_in(session: SessionState) {
    let navigate = use_navigate();
    let signed_in = session.is_signed_in();
    Effect::new(move |_| {
        if signed_in.get() {
            navigate(HOME_PATH, Default::default());
        }
    });
}

#[component]
fn AuthCard(
    #[prop(into)] heading: String,
    #[prop(into)] main_error: Signal<Option<String>>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="flex justify-center items-center px-5 w-full text-white bg-black min-h-dvh">
            <div class="flex flex-col gap-4 p-6 w-full rounded-2xl max-w-[420px] bg-neutral-950">
                <h2 class="mb-2 font-light text-white text-[32px]">{heading}</h2>
                <ErrorText error=main_error />
                {children()}
            </div>
        </div>
    }
}
