//! Flattening a structured conversation into one backend prompt.

use super::message::ConversationMessage;

/// Cue appended after the last turn; the backend continues from here.
const ASSISTANT_CUE: &str = "Assistant: ";

/// Compose the backend prompt for a conversation.
///
/// Each message becomes `"<Label>: <content>\n\n"` in input order, followed
/// by a trailing `"Assistant: "` with no newline. An empty conversation
/// yields just the cue.
#[must_use]
pub fn compose_prompt(conversation: &[ConversationMessage]) -> String {
    let body_len: usize = conversation
        .iter()
        .map(|m| m.role.prompt_label().len() + m.content.len() + 4)
        .sum();
    let mut prompt = String::with_capacity(body_len + ASSISTANT_CUE.len());

    for message in conversation {
        prompt.push_str(message.role.prompt_label());
        prompt.push_str(": ");
        prompt.push_str(&message.content);
        prompt.push_str("\n\n");
    }

    prompt.push_str(ASSISTANT_CUE);
    prompt
}
