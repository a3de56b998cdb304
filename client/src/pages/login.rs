//! Sign-in and sign-up page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Inputs are validated locally before anything reaches the session manager.
//! The manager reports the outcome through toasts and navigation, so this page
//! only tracks form fields and the current mode.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

use crate::state::session::use_session;

const MIN_PASSWORD_LEN: usize = 6;

pub const EMAIL_REQUIRED: &str = "Enter a valid email address.";
pub const PASSWORD_REQUIRED: &str = "Enter your password.";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters.";
pub const NAME_REQUIRED: &str = "Enter your name.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::SignIn => Self::SignUp,
            Self::SignUp => Self::SignIn,
        }
    }
}

fn validate_email(email: &str) -> Result<String, &'static str> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email.to_owned()),
        _ => Err(EMAIL_REQUIRED),
    }
}

/// Trimmed email and untouched password, or the first validation message.
///
/// Password strength is the identity service's call at sign-in; only an
/// empty field is rejected here.
pub fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = validate_email(email)?;
    if password.is_empty() {
        return Err(PASSWORD_REQUIRED);
    }
    Ok((email, password.to_owned()))
}

/// Trimmed email, password and trimmed name, or the first validation message.
pub fn validate_signup_input(
    email: &str,
    password: &str,
    name: &str,
) -> Result<(String, String, String), &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(NAME_REQUIRED);
    }
    let email = validate_email(email)?;
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(PASSWORD_TOO_SHORT);
    }
    Ok((email, password.to_owned(), name.to_owned()))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let mode = RwSignal::new(AuthMode::SignIn);
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let name = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());

    let busy = move || session.loading();
    let is_sign_up = move || mode.get() == AuthMode::SignUp;

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if session.loading() {
            return;
        }
        let result = match mode.get_untracked() {
            AuthMode::SignIn => validate_login_input(&email.get_untracked(), &password.get_untracked())
                .map(|(email, password)| session.login(email, password)),
            AuthMode::SignUp => {
                validate_signup_input(&email.get_untracked(), &password.get_untracked(), &name.get_untracked())
                    .map(|(email, password, name)| session.signup(email, password, name))
            }
        };
        match result {
            Ok(()) => {
                info.set(String::new());
                password.set(String::new());
            }
            Err(message) => info.set(message.to_owned()),
        }
    };

    let on_toggle = move |_| {
        mode.update(|m| *m = m.toggled());
        info.set(String::new());
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Insurance Assistant"</h1>
                <p class="login-card__subtitle">
                    {move || if is_sign_up() { "Create an account" } else { "Sign in to continue" }}
                </p>
                <form class="login-form" on:submit=on_submit>
                    <Show when=is_sign_up>
                        <input
                            class="login-input"
                            type="text"
                            placeholder="Full name"
                            prop:value=move || name.get()
                            on:input=move |ev| name.set(event_target_value(&ev))
                        />
                    </Show>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=busy>
                        {move || match (is_sign_up(), busy()) {
                            (false, false) => "Sign in",
                            (false, true) => "Signing in...",
                            (true, false) => "Sign up",
                            (true, true) => "Creating account...",
                        }}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <div class="login-divider"></div>
                <button class="login-link" type="button" on:click=on_toggle>
                    {move || if is_sign_up() { "Already have an account? Sign in" } else { "New here? Create an account" }}
                </button>
            </div>
        </div>
    }
}
