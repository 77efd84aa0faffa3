// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod event_publisher;
mod matching_algorithm;
mod persistence;

pub use event_publisher::{
    BroadcastEventPublisher, EngineEvent, EventPublisher, LoggingEventPublisher, NoOpEventPublisher,
};
pub use matching_algorithm::{ContinuousDoubleAuction, MatchingAlgorithm};
pub use persistence::{ChannelPersistenceSink, EnqueueFailed, NoOpPersistenceSink, PersistenceJob, PersistenceSink};
