pub mod decode;
pub mod scan_api;

pub use decode::{decode_scan, DecodeError, RequestEcho, Week52High};
pub use scan_api::{ScanRequest, ScanService};
