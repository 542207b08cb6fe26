use crate::app::AppState;
use crate::shared::export::download_text;
use crate::shared::notice::Notice;
use chrono::Utc;
use leptos::prelude::*;
use services::domain::a003_chat_conversation::ChatSessions;
use services::usecases::u101_inventory_assistant::{dispatch, ChatCommand, ChatEvent, InventoryAssistant};

#[derive(Clone, Copy)]
pub struct ChatPanelVm {
    pub sessions: RwSignal<ChatSessions>,
    pub input: RwSignal<String>,
}

impl ChatPanelVm {
    /// Прочитать историю и открыть последний (или новый) чат
    pub fn load(state: AppState) -> Self {
        let greeting = state.config.with_value(|c| c.assistant.greeting.clone());
        let mut sessions = ChatSessions::load(&state.storage, greeting.clone()).unwrap_or_else(|e| {
            log::error!("Failed to load chat history: {}", e);
            ChatSessions::new(greeting)
        });
        sessions.initialize(Utc::now());
        if let Err(e) = sessions.save(&state.storage) {
            log::warn!("Failed to save chat history: {}", e);
        }

        Self {
            sessions: RwSignal::new(sessions),
            input: RwSignal::new(String::new()),
        }
    }

    pub fn run(&self, state: AppState, command: ChatCommand) {
        let assistant = InventoryAssistant::new(&state.storage, state.config.get_value());
        let outcome = self
            .sessions
            .try_update(|sessions| dispatch(&state.storage, sessions, &assistant, command, Utc::now()));

        match outcome {
            Some(Ok(ChatEvent::Exported(export))) => match download_text(&export.content, &export.filename) {
                Ok(()) => log::info!("Chat exported to {}", export.filename),
                Err(e) => {
                    log::error!("Chat export failed: {}", e);
                    state.notify(Notice::error("Could not export the chat"));
                }
            },
            Some(Ok(event)) => log::debug!("Chat event: {:?}", event),
            Some(Err(e)) => {
                log::error!("Chat command failed: {:#}", e);
                state.notify(Notice::error("Chat history could not be saved"));
            }
            None => {}
        }
    }

    /// Отправить текст из поля ввода и очистить его
    pub fn send_input(&self, state: AppState) {
        let text = self.input.get_untracked();
        if text.trim().is_empty() {
            return;
        }
        self.input.set(String::new());
        self.run(state, ChatCommand::Send(text));
    }
}
