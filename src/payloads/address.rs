//! Structured-output request for randomly generated US addresses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::{Error, Result};
use crate::payloads::messages::ChatMessage;

pub const DEFAULT_ADDRESS_COUNT: u32 = 10;

/// JSON schema primitive types accepted for an address field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
    Null,
}

impl FieldType {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Integer => "integer",
            FieldType::Boolean => "boolean",
            FieldType::Object => "object",
            FieldType::Array => "array",
            FieldType::Null => "null",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim() {
            "string" => Ok(Self::String),
            "number" => Ok(Self::Number),
            "integer" => Ok(Self::Integer),
            "boolean" => Ok(Self::Boolean),
            "object" => Ok(Self::Object),
            "array" => Ok(Self::Array),
            "null" => Ok(Self::Null),
            other => Err(format!(
                "unknown type '{other}'. Supported values: string, number, integer, boolean, \
                 object, array, null."
            )),
        }
    }
}

/// One required field of every generated address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub field: String,
    #[serde(rename = "type")]
    pub kind: FieldType,
}

impl FieldSpec {
    pub fn new(field: impl Into<String>, kind: FieldType) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }

    /// Parses the `name:type` form used on the command line.
    pub fn parse(spec: &str) -> Result<Self> {
        let (name, kind) = spec.split_once(':').ok_or_else(|| Error::InvalidField {
            spec: spec.to_string(),
            reason: "expected NAME:TYPE".to_string(),
        })?;
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidField {
                spec: spec.to_string(),
                reason: "field name is empty".to_string(),
            });
        }
        let kind = kind.parse::<FieldType>().map_err(|reason| Error::InvalidField {
            spec: spec.to_string(),
            reason,
        })?;
        Ok(Self::new(name, kind))
    }

    /// Parses a JSON array of `{"field": .., "type": ..}` objects.
    pub fn parse_list(raw: &str) -> Result<Vec<Self>> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// How `response_format` is shaped in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaStyle {
    /// The bare object schema, as the exercise expects it.
    #[default]
    Bare,
    /// The `json_schema` envelope accepted by strict structured outputs.
    Strict,
}

/// Builds the object schema with an `addresses` array of `fields`.
pub fn address_schema(fields: &[FieldSpec]) -> Value {
    let mut properties = Map::new();
    for spec in fields {
        properties.insert(spec.field.clone(), json!({ "type": spec.kind.as_str() }));
    }
    let required: Vec<Value> = properties
        .keys()
        .map(|name| Value::String(name.clone()))
        .collect();

    json!({
        "type": "object",
        "properties": {
            "addresses": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": properties,
                    "required": required,
                    "additionalProperties": false
                }
            }
        },
        "required": ["addresses"],
        "additionalProperties": false
    })
}

pub fn address_request(fields: &[FieldSpec], count: u32, model: &str, style: SchemaStyle) -> Value {
    let schema = address_schema(fields);
    let response_format = match style {
        SchemaStyle::Bare => schema,
        SchemaStyle::Strict => json!({
            "type": "json_schema",
            "json_schema": {
                "name": "addresses",
                "strict": true,
                "schema": schema
            }
        }),
    };

    json!({
        "model": model,
        "messages": [
            ChatMessage::system("Respond in JSON"),
            ChatMessage::user(format!("Generate {count} random addresses in the US")),
        ],
        "response_format": response_format
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("state", FieldType::String),
            FieldSpec::new("county", FieldType::String),
            FieldSpec::new("longitude", FieldType::Number),
        ]
    }

    #[test]
    fn request_matches_expected_body() {
        let body = address_request(
            &sample_fields(),
            DEFAULT_ADDRESS_COUNT,
            "gpt-4o-mini",
            SchemaStyle::Bare,
        );
        let expected = json!({
            "model": "gpt-4o-mini",
            "messages": [
                {"role": "system", "content": "Respond in JSON"},
                {"role": "user", "content": "Generate 10 random addresses in the US"}
            ],
            "response_format": {
                "type": "object",
                "properties": {
                    "addresses": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "state": {"type": "string"},
                                "county": {"type": "string"},
                                "longitude": {"type": "number"}
                            },
                            "required": ["state", "county", "longitude"],
                            "additionalProperties": false
                        }
                    }
                },
                "required": ["addresses"],
                "additionalProperties": false
            }
        });
        assert_eq!(body, expected);
    }

    #[test]
    fn field_order_is_preserved() {
        let fields = vec![
            FieldSpec::new("zip", FieldType::Integer),
            FieldSpec::new("apartment", FieldType::String),
            FieldSpec::new("city", FieldType::String),
        ];
        let schema = address_schema(&fields);
        let items = &schema["properties"]["addresses"]["items"];
        let keys: Vec<&String> = items["properties"].as_object().unwrap().keys().collect();
        assert_eq!(keys, ["zip", "apartment", "city"]);
        assert_eq!(items["required"], json!(["zip", "apartment", "city"]));
    }

    #[test]
    fn duplicate_field_keeps_first_position_and_last_type() {
        let fields = vec![
            FieldSpec::new("state", FieldType::String),
            FieldSpec::new("zip", FieldType::String),
            FieldSpec::new("state", FieldType::Integer),
        ];
        let items = &address_schema(&fields)["properties"]["addresses"]["items"];
        assert_eq!(items["properties"]["state"], json!({"type": "integer"}));
        assert_eq!(items["required"], json!(["state", "zip"]));
    }

    #[test]
    fn empty_field_list_is_still_a_valid_schema() {
        let items = &address_schema(&[])["properties"]["addresses"]["items"];
        assert_eq!(items["properties"], json!({}));
        assert_eq!(items["required"], json!([]));
    }

    #[test]
    fn strict_style_wraps_schema_in_envelope() {
        let body = address_request(&sample_fields(), 3, "gpt-4o-mini", SchemaStyle::Strict);
        assert_eq!(body["response_format"]["type"], "json_schema");
        assert_eq!(body["response_format"]["json_schema"]["strict"], true);
        assert_eq!(
            body["response_format"]["json_schema"]["schema"],
            address_schema(&sample_fields())
        );
        assert_eq!(body["messages"][1]["content"], "Generate 3 random addresses in the US");
    }

    #[test]
    fn cli_field_specs_parse() {
        assert_eq!(
            FieldSpec::parse("longitude:number").unwrap(),
            FieldSpec::new("longitude", FieldType::Number)
        );
        assert!(FieldSpec::parse("state").is_err());
        assert!(FieldSpec::parse(":string").is_err());
        let err = FieldSpec::parse("state:text").unwrap_err();
        assert!(err.to_string().contains("unknown type 'text'"));
    }

    #[test]
    fn json_field_list_parses() {
        let fields = FieldSpec::parse_list(
            r#"[{"field": "state", "type": "string"}, {"field": "longitude", "type": "number"}]"#,
        )
        .unwrap();
        assert_eq!(fields[1], FieldSpec::new("longitude", FieldType::Number));
        assert!(FieldSpec::parse_list(r#"[{"field": "x", "type": "text"}]"#).is_err());
    }
}
