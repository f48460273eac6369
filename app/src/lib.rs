// Core application modules and components
use std::sync::Arc;

use crate::components::header;
use forms::{ClientConfig, FormKind, Session, SubmissionClient};
use leptos::{
    html::{footer, p},
    logging,
    prelude::*,
};
use serde_json::Value;

mod components;
pub mod files;
pub mod form;
pub mod storage;

use storage::LocalStorageTokenStore;

/// Who is signed in, as seen by the page.
#[derive(Clone, Copy, Debug)]
pub struct Account {
    pub user: RwSignal<Option<Value>>,
    pub signed_in: RwSignal<bool>,
}

impl Account {
    #[must_use]
    pub fn new(signed_in: bool) -> Self {
        Self {
            user: RwSignal::new(None),
            signed_in: RwSignal::new(signed_in),
        }
    }

    pub fn signed_in_as(self, user: Value) {
        logging::log!("Signed in as {user}");
        self.user.set(Some(user));
        self.signed_in.set(true);
    }

    pub fn signed_out(self) {
        self.user.set(None);
        self.signed_in.set(false);
    }
}

/// API configuration for the browser: the API is served from the page origin.
#[must_use]
pub fn browser_config() -> ClientConfig {
    web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .map(ClientConfig::new)
        .unwrap_or_default()
}

#[must_use]
pub fn component() -> impl IntoView {
    let session = Session::new(Arc::new(LocalStorageTokenStore));
    match SubmissionClient::new(browser_config(), session) {
        Ok(client) => page(client).into_any(),
        Err(err) => {
            logging::error!("Forms are unavailable: {err}");
            view! {
                <p class="p-8 text-red-400">"Forms are unavailable right now. Please reload the page."</p>
            }
            .into_any()
        }
    }
}

fn page(client: SubmissionClient) -> impl IntoView {
    let selected = RwSignal::new(FormKind::default());
    let account = Account::new(client.session().is_authenticated());
    let session = client.session().clone();

    view! {
        <div class="overflow-auto min-h-screen text-white font-poppins bg-[#1e1e1e]">
            {header::component(selected, session, account)}
            <main class="container flex flex-col gap-8 px-4 pt-24 pb-14 mx-auto max-w-4xl md:px-0">
                {move || form::component(selected.get(), client.clone(), account)}
            </main>
            {footer_component()}
        </div>
    }
}

fn footer_component() -> impl IntoView {
    footer()
        .class("fixed right-0 bottom-0 left-0 z-10 py-2 text-center md:py-4 bg-[#1e1e1e]/80 backdrop-blur-md")
        .child(p().class("text-gray-400").child("Fields marked * are required."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_function_signatures() {
        let _component_fn: fn() -> _ = component;
        let _config_fn: fn() -> ClientConfig = browser_config;
    }

    #[test]
    fn test_account_transitions() {
        let owner = Owner::new();
        owner.with(|| {
            let account = Account::new(false);
            account.signed_in_as(serde_json::json!({"id": 1}));
            assert!(account.signed_in.get_untracked());
            assert!(account.user.with_untracked(Option::is_some));

            account.signed_out();
            assert!(!account.signed_in.get_untracked());
        });
    }
}
