#[cfg(feature = "openrouter")]
pub mod client;
#[cfg(feature = "openrouter")]
pub mod generator;
pub mod prompts;
pub mod recovery;
pub mod types;

#[cfg(feature = "openrouter")]
pub use client::*;
#[cfg(feature = "openrouter")]
pub use generator::*;
pub use prompts::build_prompt;
pub use recovery::*;
pub use types::*;
