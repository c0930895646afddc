//! Generator for a small httpx program that exercises a sentiment classifier.

const SENTIMENT_SYSTEM_PROMPT: &str =
    "Analyze the sentiment of the following text and classify it as GOOD, BAD, or NEUTRAL.";

/// Returns a Python program that posts `text` to the chat-completions API
/// behind a GOOD/BAD/NEUTRAL system instruction.
pub fn sentiment_test_code(text: &str) -> String {
    let text = escape_double_quoted(text);
    format!(
        r#"
import httpx

def analyze_sentiment():
    url = "https://api.openai.com/v1/chat/completions"
    headers = {{
        "Authorization": "Bearer dummy_api_key",  # Replace with your actual API key
        "Content-Type": "application/json"
    }}

    payload = {{
        "model": "gpt-4o-mini",
        "messages": [
            {{"role": "system", "content": "{SENTIMENT_SYSTEM_PROMPT}"}},
            {{"role": "user", "content": "{text}"}}
        ]
    }}

    response = httpx.post(url, json=payload, headers=headers)
    response.raise_for_status()
    result = response.json()

    print(result)

if __name__ == "__main__":
    analyze_sentiment()
"#
    )
}

// Only the characters that would end or corrupt a double-quoted literal.
fn escape_double_quoted(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            control if u32::from(control) < 0x20 || control == '\u{7f}' => {
                escaped.push_str(&format!("\\x{:02x}", u32::from(control)));
            }
            other => escaped.push(other),
        }
    }
    escaped
}
