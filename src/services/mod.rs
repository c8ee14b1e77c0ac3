pub mod download;
pub mod gateway;
pub mod input_capture;
pub mod projection;

pub use download::{DownloadSink, FileDownloadSink};
pub use gateway::{ExportFile, ExtractionGateway, RemoteGateway};
pub use input_capture::{InputCapture, Submission};
pub use projection::{project, Extraction, PayloadShape};
