use std::future::Future;

use indexmap::IndexMap;
use leptos::prelude::*;

use crate::AuthError;

/// Which part of an auth form an error belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorTag {
    /// Form-wide errors, e.g. the identity service rejecting the request
    Main,
    Name,
    Email,
    Password,
}

pub type ErrorMap = IndexMap<ErrorTag, String>;

/// Handle given to validators for recording per-field errors
#[derive(Clone, Copy)]
pub struct ErrorSetter(RwSignal<ErrorMap>);

impl ErrorSetter {
    pub fn set(&self, tag: ErrorTag, message: impl Into<String>) {
        let message = message.into();
        self.0.update(|errors| {
            errors.insert(tag, message);
        });
    }
}

/// The actual sign in / sign up call
pub trait AuthProcess {
    fn execute(&self) -> impl Future<Output = Result<(), AuthError>>;
}

impl<F, Fut> AuthProcess for F
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<(), AuthError>>,
{
    fn execute(&self) -> impl Future<Output = Result<(), AuthError>> {
        self()
    }
}

/// Checks form input before anything is sent
///
/// Returns `true` when validation **failed**; errors are reported through the setter.
pub trait FormValidator {
    fn validate(&self, set_error: ErrorSetter) -> bool;
}

impl<F> FormValidator for F
where
    F: Fn(ErrorSetter) -> bool,
{
    fn validate(&self, set_error: ErrorSetter) -> bool {
        self(set_error)
    }
}

#[derive(Clone)]
pub struct AuthHelper<P, V> {
    process: P,
    validator: V,
    errors: RwSignal<ErrorMap>,
    loading: RwSignal<bool>,
}

pub fn use_auth_helper<P: AuthProcess, V: FormValidator>(
    process: P,
    validator: V,
) -> AuthHelper<P, V> {
    AuthHelper {
        process,
        validator,
        errors: RwSignal::new(ErrorMap::new()),
        loading: RwSignal::new(false),
    }
}

impl<P: AuthProcess, V: FormValidator> AuthHelper<P, V> {
    pub async fn execute(&self) {
        self.errors.set(ErrorMap::new());

        let invalid = self.validator.validate(self.set_error_handler());
        if invalid {
            return;
        }

        self.loading.set(true);
        if let Err(e) = self.process.execute().await {
            log::warn!("authentication failed: {e:?}");
            self.set_error_handler().set(ErrorTag::Main, e.to_string());
        }
        self.loading.set(false);
    }

    pub fn errors(&self) -> Signal<ErrorMap> {
        self.errors.into()
    }

    pub fn error(&self, tag: ErrorTag) -> Signal<Option<String>> {
        let errors = self.errors;
        Signal::derive(move || errors.with(|errors| errors.get(&tag).cloned()))
    }

    pub fn loading(&self) -> Signal<bool> {
        self.loading.into()
    }

    pub fn set_error_handler(&self) -> ErrorSetter {
        ErrorSetter(self.errors)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use futures::executor::block_on;

    use super::*;

    fn owner() -> Owner {
        let owner = Owner::new();
        owner.set();
        owner
    }

    #[test]
    fn failed_validation_never_runs_process() {
        let _owner = owner();
        let calls = Rc::new(Cell::new(0));
        let process = {
            let calls = calls.clone();
            move || {
                calls.set(calls.get() + 1);
                async { Ok(()) }
            }
        };
        let validator = |set_error: ErrorSetter| {
            set_error.set(ErrorTag::Email, "Please enter your email address");
            true
        };
        let helper = use_auth_helper(process, validator);

        block_on(helper.execute());

        assert_eq!(calls.get(), 0);
        assert!(!helper.loading().get_untracked());
        let errors = helper.errors().get_untracked();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(&ErrorTag::Email).map(String::as_str),
            Some("Please enter your email address")
        );
    }

    #[test]
    fn successful_process_leaves_no_errors() {
        let _owner = owner();
        let calls = Rc::new(Cell::new(0));
        let process = {
            let calls = calls.clone();
            move || {
                calls.set(calls.get() + 1);
                async { Ok(()) }
            }
        };
        let helper = use_auth_helper(process, |_: ErrorSetter| false);

        block_on(helper.execute());

        assert_eq!(calls.get(), 1);
        assert!(helper.errors().get_untracked().is_empty());
        assert!(!helper.loading().get_untracked());
    }

    #[test]
    fn failed_process_reports_form_wide_error() {
        let _owner = owner();
        let helper = use_auth_helper(
            || async { Err(AuthError::Api("The email address is invalid.".into())) },
            |_: ErrorSetter| false,
        );

        block_on(helper.execute());

        assert_eq!(
            helper.error(ErrorTag::Main).get_untracked().as_deref(),
            Some("The email address is invalid.")
        );
        assert!(!helper.loading().get_untracked());
    }

    #[test]
    fn loading_is_set_while_process_runs() {
        let _owner = owner();
        let loading = RwSignal::new(false);
        let seen = Rc::new(Cell::new(false));
        let process = {
            let seen = seen.clone();
            move || {
                let seen = seen.clone();
                async move {
                    seen.set(loading.get_untracked());
                    Ok(())
                }
            }
        };
        let helper = AuthHelper {
            loading,
            ..use_auth_helper(process, |_: ErrorSetter| false)
        };

        block_on(helper.execute());

        assert!(seen.get());
        assert!(!loading.get_untracked());
    }

    #[test]
    fn each_attempt_starts_with_cleared_errors() {
        let _owner = owner();
        let attempt = Rc::new(Cell::new(0));
        let process = {
            let attempt = attempt.clone();
            move || {
                attempt.set(attempt.get() + 1);
                let first = attempt.get() == 1;
                async move {
                    if first {
                        Err(AuthError::Network("offline".into()))
                    } else {
                        Ok(())
                    }
                }
            }
        };
        let helper = use_auth_helper(process, |_: ErrorSetter| false);

        block_on(helper.execute());
        assert!(helper.error(ErrorTag::Main).get_untracked().is_some());

        block_on(helper.execute());
        assert!(helper.errors().get_untracked().is_empty());
    }
}
