pub mod file;
pub mod order;
pub mod page;

pub use file::{LoadedFile, PickedFile};
pub use order::{OrderRecord, RawOrder, ResultSet, CASH_ON_DELIVERY, PLACEHOLDER};
pub use page::{ExtractionMode, Page};
