mod account;
mod amount;

pub use account::*;
pub use amount::*;
