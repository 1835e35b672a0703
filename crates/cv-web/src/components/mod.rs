//! Page components

mod claim_form;
mod error_banner;
mod result_card;

pub use claim_form::ClaimVerificationForm;
pub use error_banner::{ConfigErrorPanel, ErrorBanner};
pub use result_card::ResultCard;
