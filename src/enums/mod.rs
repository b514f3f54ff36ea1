//! Enumerated types.

mod confirm_prompt;
mod store_key;

pub use confirm_prompt::ConfirmPrompt;
pub use store_key::StoreKey;
