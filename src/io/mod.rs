mod printer;
mod statement;

pub use printer::*;
pub use statement::*;
