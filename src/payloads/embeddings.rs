use serde::Serialize;

pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Request body for the embeddings endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbeddingRequest {
    pub model: String,
    pub input: Vec<String>,
}

pub fn embedding_request<S: AsRef<str>>(messages: &[S], model: &str) -> EmbeddingRequest {
    EmbeddingRequest {
        model: model.to_string(),
        input: messages.iter().map(|m| m.as_ref().to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn messages_are_kept_in_order_and_verbatim() {
        let messages = [
            "Dear user, please verify your transaction code 10389 sent to someone@example.com",
            "Dear user, please verify your transaction code 33454 sent to someone@example.com",
        ];
        let value =
            serde_json::to_value(embedding_request(&messages, DEFAULT_EMBEDDING_MODEL)).unwrap();
        assert_eq!(
            value,
            json!({
                "model": "text-embedding-3-small",
                "input": messages
            })
        );
    }

    #[test]
    fn empty_input_is_serialized_as_empty_array() {
        let request = embedding_request::<&str>(&[], DEFAULT_EMBEDDING_MODEL);
        let value = serde_json::to_value(request).unwrap();
        assert_eq!(value["input"], json!([]));
    }
}
