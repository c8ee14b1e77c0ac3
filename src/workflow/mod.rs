pub mod order_flow;
pub mod session;

pub use order_flow::{ExportOutcome, OrderWorkflow, SubmitOutcome};
pub use session::Session;
