pub mod base;
pub mod errors;
pub mod formats;
pub mod mock;
pub mod openrouter;
pub mod utils;

pub use base::{Provider, ProviderCompleteResponse, Usage};
pub use errors::ProviderError;
pub use openrouter::{OpenRouterConfig, OpenRouterProvider};
