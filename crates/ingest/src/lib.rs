pub mod persist;
pub mod pipeline;
pub mod probe;
pub mod sidecar;
