pub mod analysis;
pub mod evaluation;
pub mod ground_truth;
mod lenient;
pub mod task;

pub use analysis::*;
pub use evaluation::*;
pub use ground_truth::*;
pub use task::*;
