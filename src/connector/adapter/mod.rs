mod file_key_value_store;
mod groq_client;
mod http_request_orchestrator;
mod in_memory_key_value_store;
mod mock_completion_gateway;

pub use file_key_value_store::*;
pub use groq_client::*;
pub use http_request_orchestrator::*;
pub use in_memory_key_value_store::*;
pub use mock_completion_gateway::*;
