//! Canned assistant reply engine.
//!
//! There is no model behind the prototype: replies come from keyword
//! routing over the latest user message, and a configurable delay
//! stands in for inference time. Replies use the markdown subset the
//! renderer supports, so assistant output exercises the full pipeline.

use std::time::Duration;

use tracing::debug;

use crate::chat::{ChatError, ChatRequest, ChatResponse};

/// Mock assistant client with a simulated thinking delay.
#[derive(Debug, Clone)]
pub struct Assistant {
    reply_delay: Duration,
}

impl Assistant {
    /// Creates an assistant that waits `reply_delay` before answering.
    /// A zero delay answers immediately.
    pub fn new(reply_delay: Duration) -> Self {
        Self { reply_delay }
    }

    /// Answers the latest user message in `request`.
    ///
    /// # Errors
    /// Returns a [`ChatError`] if the request is malformed or contains
    /// no user-authored message.
    pub async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ChatError> {
        let message = request.latest_user_message()?;

        if !self.reply_delay.is_zero() {
            tokio::time::sleep(self.reply_delay).await;
        }

        Ok(generate_reply(message))
    }
}

/// Routes `message` to a canned reply.
///
/// Categories are checked in order and the first match wins. Matching
/// is case-insensitive substring containment, so routing is fuzzy on
/// purpose (e.g. "this" contains "hi" and lands on the greeting).
pub fn generate_reply(message: &str) -> ChatResponse {
    let lowered = message.to_lowercase();

    if lowered.contains("maintenance") || lowered.contains("service") {
        debug!("routing reply: maintenance");
        return ChatResponse {
            reply: "For your vehicles, I recommend checking the maintenance schedule in your \
                    owner's manual. Generally, oil changes are needed every 5,000-7,500 miles, \
                    and major services every 30,000-60,000 miles. Would you like specific \
                    recommendations for any of your vehicles?"
                .to_string(),
            follow_up_questions: vec![
                "What's the maintenance schedule for my Toyota Camry?".to_string(),
                "When should I change my oil?".to_string(),
                "How often should I check tire pressure?".to_string(),
                "What are signs I need brake service?".to_string(),
            ],
        };
    }

    if lowered.contains("fuel") || lowered.contains("gas") || lowered.contains("mileage") {
        debug!("routing reply: fuel efficiency");
        return ChatResponse {
            reply: "To improve fuel efficiency:\n\n\
                    - **Regular maintenance**: Keep your engine tuned\n\
                    - **Tire pressure**: Check monthly for optimal pressure\n\
                    - **Driving habits**: Avoid rapid acceleration and hard braking\n\
                    - **Air filter**: Replace when dirty\n\n\
                    Which vehicle would you like specific advice for?"
                .to_string(),
            follow_up_questions: vec![
                "How can I improve my highway fuel efficiency?".to_string(),
                "What's the best driving speed for fuel economy?".to_string(),
                "Should I use premium gas?".to_string(),
                "How does tire pressure affect fuel consumption?".to_string(),
            ],
        };
    }

    if lowered.contains("problem") || lowered.contains("issue") || lowered.contains("trouble") {
        debug!("routing reply: diagnostics");
        return ChatResponse {
            reply: "I'd be happy to help diagnose vehicle issues! Can you provide more details \
                    about:\n\n\
                    - Which vehicle is having the problem?\n\
                    - What symptoms are you experiencing?\n\
                    - When did the issue start?\n\
                    - Any warning lights on the dashboard?"
                .to_string(),
            follow_up_questions: vec![
                "My car is making strange noises".to_string(),
                "The engine won't start".to_string(),
                "I have a warning light on my dashboard".to_string(),
                "My car is vibrating while driving".to_string(),
            ],
        };
    }

    if lowered.contains("hello") || lowered.contains("hi") || lowered.contains("hey") {
        debug!("routing reply: greeting");
        return ChatResponse {
            reply: "Hello! I'm ORIN AI, your vehicle assistant. I can help you with:\n\n\
                    🔧 **Maintenance schedules**\n\
                    ⛽ **Fuel efficiency tips**\n\
                    🚗 **Troubleshooting issues**\n\
                    📋 **Vehicle recommendations**\n\n\
                    What would you like to know about your vehicles?"
                .to_string(),
            follow_up_questions: vec![
                "What maintenance does my car need?".to_string(),
                "How can I improve fuel efficiency?".to_string(),
                "My car has a problem, can you help?".to_string(),
                "What's the best oil for my vehicle?".to_string(),
            ],
        };
    }

    debug!("routing reply: default");
    ChatResponse {
        reply: format!(
            "I understand you're asking about \"{message}\". As your vehicle AI assistant, I \
             can help with maintenance, troubleshooting, fuel efficiency, and general vehicle \
             questions. Could you provide more specific details about what you'd like to know?"
        ),
        follow_up_questions: vec![
            "Tell me about vehicle maintenance".to_string(),
            "How to improve fuel efficiency?".to_string(),
            "Help me diagnose a car problem".to_string(),
            "What oil should I use?".to_string(),
        ],
    }
}
