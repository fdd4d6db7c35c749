// src/services/prompt.rs
//! String handling around the model call: pulling the user's words out of the
//! history, wrapping them in the persona, and scrubbing what comes back.

pub const DEFAULT_MESSAGE: &str = "Hello";
pub const REPLY_MARKER: &str = "Jarvis:";

const USER_MARKER: &str = "User:";
const MOOD_MARKER: &str = "(feeling";
const PERSONA_LEAK: &str = "You are Jarvis";
const LEAKED_LINE_PREFIXES: &[&str] = &["You are", USER_MARKER];

/// The text of the latest user turn.
///
/// A turn like `"User: (feeling sad): I feel anxious"` yields `"I feel anxious"`.
/// The mood tag is split off at the first colon after `User:`, so a message
/// that itself contains a colon next to a mood tag can lose text.
pub fn extract_user_message(history: &[String]) -> String {
    let Some(last) = history.last() else {
        return DEFAULT_MESSAGE.to_string();
    };

    match last.split_once(USER_MARKER) {
        Some((_, rest)) => {
            let text = rest.trim();
            if text.contains(MOOD_MARKER) {
                match text.split_once(':') {
                    Some((_, after)) => after.trim().to_string(),
                    None => text.to_string(),
                }
            } else {
                text.to_string()
            }
        }
        None => last.clone(),
    }
}

pub fn build_prompt(user_message: &str) -> String {
    format!(
        "You are Jarvis, a compassionate mental health assistant. Provide helpful, supportive advice. \
         Keep responses concise (2-3 sentences), warm, and encouraging.\n\
         \n\
         User: {user_message}\n\
         \n\
         {REPLY_MARKER}"
    )
}

/// Strips echoed prompt text from raw model output. May return an empty string.
pub fn clean_reply(raw: &str) -> String {
    let mut reply = raw.trim().to_string();

    if let Some(idx) = reply.rfind(REPLY_MARKER) {
        reply = reply[idx + REPLY_MARKER.len()..].trim().to_string();
    }

    if reply.contains(PERSONA_LEAK) {
        reply = reply
            .split('\n')
            .filter(|line| !LEAKED_LINE_PREFIXES.iter().any(|p| line.starts_with(p)))
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string();
    }

    reply
}
