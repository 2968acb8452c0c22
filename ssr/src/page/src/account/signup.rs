use auth::{firebase::FirebaseAuth, use_auth_helper, ErrorSetter, ErrorTag};
use component::{buttons::HighlightedButton, form::InputField};
use consts::{limits::MIN_PASSWORD_LEN, APP_NAME, LOGIN_PATH};
use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::components::A;
use state::session::session_state;

use super::validators::{email_validator, name_validator, password_validator};
use super::{check, go_home_when_signed_in, AuthCard};

#[component]
pub fn Signup() -> impl IntoView {
    let session = session_state();
    go_home_when_signed_in(session);

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());

    let process = move || {
        let name = name.get_untracked().trim().to_string();
        let email = email.get_untracked().trim().to_string();
        let password = password.get_untracked();
        async move {
            let res = FirebaseAuth::default()
                .sign_up(&name, &email, &password)
                .await?;
            session.sign_in(res);
            Ok(())
        }
    };
    let validator = move |set_error: ErrorSetter| {
        check(set_error, ErrorTag::Name, name_validator(&name.get_untracked()))
            | check(set_error, ErrorTag::Email, email_validator(&email.get_untracked()))
            | check(
                set_error,
                ErrorTag::Password,
                password_validator(&password.get_untracked()),
            )
    };

    let helper = use_auth_helper(process, validator);
    let loading = helper.loading();
    let main_error = helper.error(ErrorTag::Main);
    let name_error = helper.error(ErrorTag::Name);
    let email_error = helper.error(ErrorTag::Email);
    let password_error = helper.error(ErrorTag::Password);

    let submit = Action::new_local(move |_: &()| {
        let helper = helper.clone();
        async move { helper.execute().await }
    });

    view! {
        <Title text=format!("{APP_NAME} - Sign up") />
        <AuthCard heading="Create account" main_error>
            <InputField id="name-input" label="Name" value=name error=name_error />
            <InputField
                id="email-input"
                label="Email"
                value=email
                error=email_error
                input_type="email"
                placeholder="you@example.com"
            />
            <InputField
                id="password-input"
                label="Password"
                value=password
                error=password_error
                input_type="password"
                placeholder=format!("At least {MIN_PASSWORD_LEN} characters")
            />
            <HighlightedButton
                on_click=move || {
                    submit.dispatch(());
                }
                loading
            >
                "Sign up"
            </HighlightedButton>
            <span class="text-sm text-center text-neutral-400">
                "Already registered? "
                <A href=LOGIN_PATH attr:class="text-pink-400">"Log in"</A>
            </span>
        </AuthCard>
    }
}
