// Application layer - the ledger operations and their error/report types.
// Any command layer (CLI, bot adapter, ...) talks to the core through here.

pub mod error;
pub mod reporting;
pub mod service;

pub use error::*;
pub use reporting::*;
pub use service::*;
