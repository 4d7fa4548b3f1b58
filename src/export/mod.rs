pub mod record;
pub mod storage;

pub use record::{ExportRecord, UTF8_BOM};
pub use storage::write_export;
