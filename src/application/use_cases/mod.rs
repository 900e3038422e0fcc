mod classify_prompt;
mod conversation;
mod generate_response;
mod history;
mod presentation;

pub use classify_prompt::*;
pub use conversation::*;
pub use generate_response::*;
pub use history::*;
pub use presentation::*;
