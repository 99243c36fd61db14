mod money;
mod operation;
mod statement;

pub use money::*;
pub use operation::*;
pub use statement::*;
