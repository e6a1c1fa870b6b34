pub mod evidence;
pub mod state;

pub use evidence::SearchHit;
pub use state::{StateUpdate, WorkflowState};
