use auth::{AuthSession, RefreshedTokens};
use codee::string::JsonSerdeCodec;
use consts::{SESSION_MAX_AGE, SESSION_STORE};
use leptos::prelude::*;
use leptos_use::{use_cookie_with_options, SameSite, UseCookieOptions};

/// The signed in user, kept in a cookie so server rendering sees it too
#[derive(Clone, Copy)]
pub struct SessionState {
    session: Signal<Option<AuthSession>>,
    set_session: WriteSignal<Option<AuthSession>>,
}

impl SessionState {
    pub fn new() -> Self {
        let (session, set_session) = use_cookie_with_options::<AuthSession, JsonSerdeCodec>(
            SESSION_STORE,
            UseCookieOptions::default()
                .path("/")
                .max_age(SESSION_MAX_AGE.as_millis() as i64)
                .same_site(SameSite::Lax),
        );
        Self {
            session,
            set_session,
        }
    }

    pub fn from_signals(
        session: Signal<Option<AuthSession>>,
        set_session: WriteSignal<Option<AuthSession>>,
    ) -> Self {
        Self {
            session,
            set_session,
        }
    }

    pub fn get() -> Self {
        let this: Self = expect_context();
        this
    }

    pub fn is_signed_in(&self) -> Signal<bool> {
        let session = self.session;
        Signal::derive(move || session.with(Option::is_some))
    }

    pub fn id_token_untracked(&self) -> Option<String> {
        self.session
            .with_untracked(|s| s.as_ref().map(|s| s.id_token.clone()))
    }

    pub fn sign_in(&self, session: AuthSession) {
        log::info!("session started for {}", session.uid);
        self.set_session.set(Some(session));
    }

    pub fn session_untracked(&self) -> Option<AuthSession> {
        self.session.get_untracked()
    }

    pub fn update_tokens(&self, tokens: RefreshedTokens) {
        self.set_session
            .update(|s| *s = s.take().map(|s| s.with_tokens(tokens)));
    }

    pub fn sign_out(&self) {
        self.set_session.set(None);
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn session_state() -> SessionState {
    SessionState::get()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> AuthSession {
        AuthSession {
            uid: "u1".into(),
            email: "a@b.co".into(),
            display_name: Some("Ann".into()),
            id_token: "tok".into(),
            refresh_token: "ref".into(),
        }
    }

    #[test]
    fn sign_in_and_out_update_derived_state() {
        let owner = Owner::new();
        owner.set();

        let (read, write) = signal(None);
        let state = SessionState::from_signals(read.into(), write);
        assert!(!state.is_signed_in().get_untracked());
        assert_eq!(state.session_untracked(), None);

        state.sign_in(session());
        assert!(state.is_signed_in().get_untracked());
        assert_eq!(state.session_untracked().map(|s| s.uid).as_deref(), Some("u1"));
        assert_eq!(state.id_token_untracked().as_deref(), Some("tok"));

        state.update_tokens(RefreshedTokens {
            user_id: "u1".into(),
            id_token: "tok2".into(),
            refresh_token: "ref2".into(),
        });
        let refreshed = state.session_untracked().unwrap();
        assert_eq!(refreshed.id_token, "tok2");
        assert_eq!(refreshed.refresh_token, "ref2");
        assert_eq!(refreshed.display_name.as_deref(), Some("Ann"));

        state.sign_out();
        assert!(!state.is_signed_in().get_untracked());
        assert_eq!(state.id_token_untracked(), None);
    }

    #[test]
    fn provided_state_is_reachable_from_context() {
        let owner = Owner::new();
        owner.set();

        let (read, write) = signal(None);
        provide_context(SessionState::from_signals(read.into(), write));
        session_state().sign_in(session());

        assert_eq!(read.get_untracked().map(|s| s.uid), Some("u1".to_string()));
    }
}
