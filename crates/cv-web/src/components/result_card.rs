//! Verification result card

use cv_core::VerificationResult;
use leptos::*;

#[component]
pub fn ResultCard(result: VerificationResult) -> impl IntoView {
    view! {
        <div class="bg-white rounded-lg shadow p-6 space-y-4">
            <h2 class="text-xl font-semibold">"Verification Result"</h2>
            <div>
                <h3 class="text-sm font-medium text-gray-500 uppercase">"Original Claim"</h3>
                <p class="mt-1 text-gray-900">{result.claim}</p>
            </div>
            <div>
                <h3 class="text-sm font-medium text-gray-500 uppercase">"Verification"</h3>
                <p class="mt-1 text-gray-900 whitespace-pre-wrap">{result.verification}</p>
            </div>
        </div>
    }
}
