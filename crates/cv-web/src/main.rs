//! Political Claim Verifier web front end

mod app;
mod components;

use cv_core::ClientConfig;
use leptos::*;

/// Verification service base URL, fixed when the bundle is built.
const API_BASE_URL: Option<&str> = option_env!("CLAIM_VERIFIER_API_BASE_URL");

fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    let config = ClientConfig::from_optional(API_BASE_URL);
    match &config {
        Ok(config) => tracing::info!("Verification endpoint: {}", config.endpoint()),
        Err(e) => tracing::error!("Invalid configuration: {}", e),
    }

    mount_to_body(move || {
        view! {
            <app::App config=config/>
        }
    });
}
