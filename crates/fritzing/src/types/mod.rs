pub mod part;
pub mod primitives;
pub mod sketch;

pub use part::*;
pub use primitives::*;
pub use sketch::*;
