pub mod category;
pub mod snapshot;
pub mod table;

pub use category::*;
pub use snapshot::*;
pub use table::*;
