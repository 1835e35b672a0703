//! Claim input form
//!
//! All state lives in one `ClaimForm`; the view below only reads
//! `ClaimForm::view` so the banner and the result card are never shown
//! together.

use super::{ErrorBanner, ResultCard};
use cv_core::{ClaimForm, HttpVerifier, Verifier};
use leptos::*;

#[component]
pub fn ClaimVerificationForm(verifier: HttpVerifier) -> impl IntoView {
    let form = create_rw_signal(ClaimForm::new());
    let view_state = create_memo(move |_| form.with(ClaimForm::view));
    let verifier = store_value(verifier);

    // a request still in flight when the page goes away settles into nothing
    on_cleanup(move || {
        form.try_update(ClaimForm::abandon);
    });

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let Some(pending) = form.try_update(ClaimForm::begin_submit).flatten() else {
            return;
        };
        let verifier = verifier.get_value();

        spawn_local(async move {
            let outcome = verifier.verify(&pending.claim).await;
            form.try_update(|f| f.settle(pending.attempt, outcome));
        });
    };

    view! {
        <form on:submit=on_submit class="bg-white rounded-lg shadow p-6 space-y-4">
            <textarea
                rows="4"
                class="w-full px-4 py-3 border border-gray-300 rounded-lg focus:ring-2 focus:ring-blue-500"
                placeholder="e.g., 'The economy grew by 5% last quarter.'"
                aria-label="Political claim input"
                disabled=move || view_state.with(|v| v.input_disabled)
                on:input=move |ev| form.update(|f| f.set_input(event_target_value(&ev)))
                prop:value=move || form.with(|f| f.input().to_string())
            ></textarea>
            <button
                type="submit"
                class="w-full bg-blue-600 text-white px-4 py-2 rounded-lg hover:bg-blue-700 disabled:opacity-50"
                disabled=move || view_state.with(|v| v.submit_disabled)
            >
                {move || view_state.with(|v| v.submit_label)}
            </button>
        </form>

        {move || {
            view_state
                .with(|v| v.error.clone())
                .map(|message| view! { <ErrorBanner message=message/> })
        }}

        {move || {
            view_state
                .with(|v| v.result.clone())
                .map(|result| view! { <ResultCard result=result/> })
        }}
    }
}
