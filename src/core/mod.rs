pub mod actor;
pub mod collector;
pub mod inbound;
pub mod orchestrator;
pub mod outbound;
pub mod stage;
pub mod tag;
pub mod transform;
pub mod types;
pub mod worker;
