pub mod types;
pub mod validate;
pub mod schedule;
pub mod queries;

pub use types::*;
pub use validate::*;
pub use schedule::*;
pub use queries::*;
