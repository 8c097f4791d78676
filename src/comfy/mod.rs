pub mod client;
pub mod traits;

pub use client::ComfyClient;
pub use traits::GenerationClient;
