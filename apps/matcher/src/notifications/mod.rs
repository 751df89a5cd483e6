// Notification layer: in-process, single-consumer event bus for completed matches.
// Subscribers run on the bus worker and never on the scoring path.

pub mod bus;
pub mod events;
pub mod subscribers;

pub use bus::{BusConfig, BusState, MatchSubscriber, NotificationBus, SubscriptionId};
pub use events::{MatchComputedEvent, Priority};
pub use subscribers::{AnalyticsSnapshot, AnalyticsSubscriber, LoggingSubscriber};
