//! Match, bomb and refill engine.

pub mod bomb_chain;
pub mod connectivity;
pub mod events;
pub mod manager;
pub mod obstacles;
pub mod resolution;
pub mod timeline;

pub use connectivity::MatchResult;
pub use events::{EventSummary, MutationEvent};
pub use manager::Engine;
pub use obstacles::ObstacleState;
pub use resolution::Compaction;
pub use timeline::{plan_timeline, total_duration, TimedEvent};
