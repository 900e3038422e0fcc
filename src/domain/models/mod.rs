mod conversation_phase;
mod message;
mod prompt;
mod study_session;

pub use conversation_phase::*;
pub use message::*;
pub use prompt::*;
pub use study_session::*;
