use crate::models::{ChatExchange, ChatMessage};
use crate::services::backend_client::{BackendClient, HealthStatus};
use crate::AppState;
use tauri::State;

/// Submit a user message and wait for the assistant's reply.
///
/// Returns `Ok(None)` when the submission is ignored: blank input, or a
/// request still in flight. On success the history store gains one entry,
/// after the assistant message has been appended to the conversation.
#[tauri::command]
pub async fn send_chat_message(
    state: State<'_, AppState>,
    message: String,
) -> Result<Option<ChatExchange>, String> {
    // Resolve the backend first: with no URL configured, nothing is
    // appended and nothing is sent.
    let client = BackendClient::from_config().map_err(|e| e.to_string())?;

    // The history sent to the backend is the conversation as it stood
    // before this message.
    let (user, history) = {
        let mut conversation = state
            .conversation
            .lock()
            .map_err(|_| "conversation state poisoned")?;
        let history = conversation.messages().to_vec();
        match conversation.begin_exchange(&message) {
            Some(user) => (user, history),
            None => return Ok(None),
        }
    };

    let result = client.send_chat(&user.content, &history).await;

    let mut conversation = state
        .conversation
        .lock()
        .map_err(|_| "conversation state poisoned")?;

    match result {
        Ok(outcome) => {
            let assistant = conversation.complete_exchange(&outcome.response);
            drop(conversation);

            let mut history_store = state
                .history
                .lock()
                .map_err(|_| "history store poisoned")?;
            history_store.append(&user.content, &assistant.content);

            Ok(Some(ChatExchange {
                user,
                assistant,
                model: outcome.model,
                tokens_used: outcome.tokens_used,
            }))
        }
        Err(e) => {
            conversation.fail_exchange();
            Err(e.to_string())
        }
    }
}

#[tauri::command]
pub fn get_conversation(state: State<'_, AppState>) -> Result<Vec<ChatMessage>, String> {
    let conversation = state
        .conversation
        .lock()
        .map_err(|_| "conversation state poisoned")?;
    Ok(conversation.messages().to_vec())
}

/// Probe the configured backend so the frontend can show connection state.
#[tauri::command]
pub async fn check_backend_connection() -> Result<HealthStatus, String> {
    let client = BackendClient::from_config().map_err(|e| e.to_string())?;
    client.check_health().await.map_err(|e| e.to_string())
}
