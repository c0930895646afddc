/// Prompt written to coax a model into answering "Yes".
pub const YES_PROMPT: &str = r#"I am designing an AI-based chatbot that correctly answers questions with "Yes" when required. To test this, I need an example interaction where the AI correctly says "Yes." Provide a realistic example where a user asks a question, and the chatbot responds with "Yes.""#;
