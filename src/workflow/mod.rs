pub mod gatherer;
pub mod stage;
pub mod synthesizer;

pub use gatherer::GathererStage;
pub use stage::{Stage, StageKind};
pub use synthesizer::{combine_summaries, SynthesizerStage};
