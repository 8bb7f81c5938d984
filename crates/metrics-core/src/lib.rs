pub mod error;
pub mod math;
pub mod metric;
pub mod table;
pub mod traits;
pub mod types;

pub use error::*;
pub use math::*;
pub use metric::*;
pub use table::*;
pub use traits::*;
pub use types::*;
