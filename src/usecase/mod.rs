//! Use case layer: business logic invoked per inbound envelope.

mod coordinator;

pub use coordinator::ChatCoordinator;
