mod dashboard;
mod money;
mod transaction;

pub use dashboard::*;
pub use money::*;
pub use transaction::*;
