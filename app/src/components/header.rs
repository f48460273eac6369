use forms::{FormKind, Session};
use leptos::{ev::MouseEvent, logging, prelude::*};

use crate::Account;

/// Navigation between the forms, plus a sign-out button while signed in.
pub fn component(selected: RwSignal<FormKind>, session: Session, account: Account) -> impl IntoView {
    let tabs = FormKind::ALL
        .into_iter()
        .map(|kind| {
            let class = move || {
                if selected.get() == kind {
                    "text-sm font-bold sm:text-base text-[#ffef5c]"
                } else {
                    "text-sm font-bold text-white transition-all duration-500 sm:text-base hover:text-[#ffef5c]"
                }
            };
            view! {
                <button type="button" class=class on:click=move |_| selected.set(kind)>
                    {kind.title()}
                </button>
            }
        })
        .collect_view();

    let sign_out = move |_: MouseEvent| {
        if let Err(err) = session.clear() {
            logging::warn!("Stored session could not be removed: {err}");
        }
        account.signed_out();
    };

    let sign_out_button = move || {
        account.signed_in.get().then(|| {
            view! {
                <button type="button" class="text-sm hover:underline text-[#ffef5c]" on:click=sign_out.clone()>
                    "Sign out"
                </button>
            }
        })
    };

    view! {
        <header class="fixed top-0 right-0 left-0 z-10 py-6 px-4 md:px-6 bg-[#1e1e1e]/80 backdrop-blur-md">
            <div class="container mx-auto max-w-5xl">
                <nav class="flex flex-row flex-wrap gap-4 justify-between items-center">
                    <div class="flex flex-row flex-wrap gap-4">{tabs}</div>
                    {sign_out_button}
                </nav>
            </div>
        </header>
    }
}
