pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    CompletionGateway, ConversationState, EmptyCompletionPolicy, GenerateResponseUseCase,
    HistoryStore, KeyValueStore, PromptClassifier, RequestOrchestrator, SubmitOutcome,
};

pub use cli::{Commands, HistoryCommand};

pub use connector::{
    build_router, AppState, FileKeyValueStore, GroqClient, HttpRequestOrchestrator,
    InMemoryKeyValueStore, MockCompletionGateway, ServerConfig,
};

pub use domain::{
    Category, ClassifiedPrompt, DomainError, Message, Phase, Role, StudySession, View,
};
