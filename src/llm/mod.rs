pub mod client;
pub mod extractor;
pub mod prompts;

pub use client::*;
pub use extractor::*;
pub use prompts::*;
