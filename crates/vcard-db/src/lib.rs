pub mod error;
pub mod file;
pub mod memory;
pub mod remote;
pub mod service;
pub mod store;

pub use error::StoreError;
pub use service::RecordService;
pub use store::StoreBackend;
