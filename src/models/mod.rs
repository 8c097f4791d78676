pub mod intent;
pub mod workflow;

pub use intent::*;
pub use workflow::*;
