//! The generic form view.
//!
//! One view serves every form of the catalog: it keeps a [`FormController`] in
//! an `RwSignal`, renders one atom per declared field and runs the submit cycle
//! in two halves so the signal is never borrowed across the network call.

use forms::catalog::login::{GOOGLE_SIGN_IN_PATH, complete_login};
use forms::{Completion, FormController, FormKind, SubmissionClient, SubmissionStatus};
use leptos::{ev::SubmitEvent, logging, prelude::*, task::spawn_local};
use serde_json::Value;

use crate::Account;
use crate::components::field;

/// Message shown under the form once a submit attempt has settled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Banner {
    Success(&'static str),
    Failure(String),
}

/// Picks the banner for the current status.
///
/// A failure always shows a banner, even when the server error was attached to
/// a single field.
#[must_use]
pub fn status_banner(
    kind: FormKind,
    status: SubmissionStatus,
    general: Option<&str>,
    failure_message: &str,
) -> Option<Banner> {
    match status {
        SubmissionStatus::Success => Some(Banner::Success(kind.success_message())),
        SubmissionStatus::Error => Some(Banner::Failure(
            general.unwrap_or(failure_message).to_owned(),
        )),
        SubmissionStatus::Idle | SubmissionStatus::Submitting => None,
    }
}

#[must_use]
pub const fn submit_label(kind: FormKind, submitting: bool) -> &'static str {
    if submitting {
        "Sending..."
    } else {
        kind.submit_label()
    }
}

/// Renders the form `kind`, posting through `client`.
pub fn component(kind: FormKind, client: SubmissionClient, account: Account) -> impl IntoView {
    let controller = RwSignal::new(FormController::new(kind.schema(), client));
    let fields = controller.with_untracked(|form| form.schema().fields().to_vec());

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let Some(payload) = controller
            .try_update(FormController::begin_submit)
            .flatten()
        else {
            return;
        };
        let (client, endpoint) = controller
            .with_untracked(|form| (form.client().clone(), form.schema().endpoint.clone()));

        spawn_local(async move {
            let outcome = client.submit(&endpoint, &payload).await;
            controller.try_update(|form| {
                let completion = if kind == FormKind::Login {
                    let on_login = move |user: &Value| account.signed_in_as(user.clone());
                    complete_login(form, outcome, Some(&on_login))
                } else {
                    form.complete_submit(outcome)
                };
                if let Completion::Failed(failure) = completion {
                    logging::warn!("{} was not sent: {failure}", kind.title());
                }
            });
        });
    };

    let submitting = move || controller.with(FormController::is_submitting);
    let banner = move || {
        controller
            .with(|form| {
                status_banner(
                    kind,
                    form.status(),
                    form.errors().general(),
                    form.schema().failure_message,
                )
            })
            .map(|banner| match banner {
                Banner::Success(message) => {
                    view! { <p class="font-bold text-green-400">{message}</p> }.into_any()
                }
                Banner::Failure(message) => {
                    view! { <p role="alert" class="font-bold text-red-400">{message}</p> }
                        .into_any()
                }
            })
    };
    let session_notice = move || {
        (kind.requires_session() && !account.signed_in.get()).then(|| {
            view! {
                <p class="text-gray-300">"Sign in with your partner account before submitting a property."</p>
            }
        })
    };
    let google = (kind == FormKind::Login).then(|| {
        view! {
            <a href=GOOGLE_SIGN_IN_PATH class="block py-3 px-6 w-full text-center border hover:underline border-[#ffef5c] text-[#ffef5c]">
                "Continue with Google"
            </a>
        }
    });

    view! {
        <section class="py-12 px-4 sm:px-6 lg:px-8 bg-[#2a2a2a]">
            <div class="mx-auto max-w-3xl">
                <h2 class="mb-8 text-3xl font-bold text-[#ffef5c]">{kind.title()}</h2>
                <form class="space-y-6" novalidate=true on:submit=on_submit>
                    {session_notice}
                    {fields
                        .into_iter()
                        .map(|spec| field::component(spec, controller))
                        .collect_view()}
                    <button
                        type="submit"
                        disabled=submitting
                        class="flex justify-center items-center py-3 px-6 w-full text-lg font-semibold transition-colors disabled:opacity-60 bg-[#ffef5c] text-[#1e1e1e] hover:bg-[#ffef5c]/90"
                    >
                        {move || submit_label(kind, submitting())}
                    </button>
                    {banner}
                    {google}
                </form>
            </div>
        </section>
    }
}
