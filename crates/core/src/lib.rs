pub mod types;

pub use types::{FileOutcome, StageKind};
