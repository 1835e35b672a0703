//! Main application component

use crate::components::*;
use cv_core::{ClientConfig, ConfigError, HttpVerifier};
use leptos::*;

#[component]
pub fn App(config: Result<ClientConfig, ConfigError>) -> impl IntoView {
    let body = match config {
        Ok(config) => view! {
            <ClaimVerificationForm verifier=HttpVerifier::new(&config)/>
        }
        .into_view(),
        Err(err) => view! {
            <ConfigErrorPanel message=err.to_string()/>
        }
        .into_view(),
    };

    view! {
        <div class="min-h-screen bg-gray-100">
            <div class="container mx-auto max-w-2xl px-4 py-12">
                <header class="mb-8 text-center">
                    <h1 class="text-3xl font-bold text-gray-900">"Political Claim Verifier"</h1>
                    <p class="mt-2 text-gray-600">
                        "Enter a political claim below, and our AI-powered system will provide a verification."
                    </p>
                </header>

                <main class="space-y-6">
                    {body}
                </main>
            </div>
        </div>
    }
}
