use anyhow::Result;
use tokio::io::BufReader;

use crate::cli::{Commands, HistoryCommand};

use super::container::Container;
use super::controller::{ChatController, HistoryController};

pub struct Router<'a> {
    chat_controller: ChatController<'a>,
    history_controller: HistoryController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            chat_controller: ChatController::new(container),
            history_controller: HistoryController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Chat => {
                let input = BufReader::new(tokio::io::stdin());
                self.chat_controller
                    .run(input, &mut std::io::stdout())
                    .await
            }
            Commands::History { action } => match action {
                HistoryCommand::List => self.history_controller.list(),
                HistoryCommand::Show { id } => self.history_controller.show(&id),
                HistoryCommand::Delete { id } => self.history_controller.delete(&id),
                HistoryCommand::Clear { yes } => self.history_controller.clear(yes),
            },
            Commands::Serve { .. } => unreachable!("Serve command is handled separately in main"),
        }
    }
}
