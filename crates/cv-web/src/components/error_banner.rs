//! Error display

use leptos::*;

#[component]
pub fn ErrorBanner(message: String) -> impl IntoView {
    view! {
        <div role="alert" class="p-4 rounded-lg bg-red-50 border border-red-200 text-red-700">
            {message}
        </div>
    }
}

/// Shown instead of the form when the bundle was built without a usable base URL.
#[component]
pub fn ConfigErrorPanel(message: String) -> impl IntoView {
    view! {
        <div class="bg-white rounded-lg shadow p-6">
            <h2 class="text-xl font-semibold text-red-700 mb-2">"Configuration error"</h2>
            <p class="text-gray-600">{message}</p>
            <p class="text-sm text-gray-500 mt-2">
                "Rebuild with CLAIM_VERIFIER_API_BASE_URL set to the verification service address."
            </p>
        </div>
    }
}
