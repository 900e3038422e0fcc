mod completion_gateway;
mod key_value_store;
mod request_orchestrator;

pub use completion_gateway::*;
pub use key_value_store::*;
pub use request_orchestrator::*;
