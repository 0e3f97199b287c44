pub mod fault_guard;
pub mod request_id;

pub use fault_guard::FaultGuard;
pub use request_id::{REQUEST_ID_HEADER, RequestId, RequestIdMiddleware};
