use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Configuration for the Anthropic API client
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    /// API key (from ANTHROPIC_API_KEY env var)
    pub api_key: String,
    /// Model to use (e.g., "claude-sonnet-4-20250514")
    pub model: String,
    /// Temperature (0-1, lower = more deterministic)
    pub temperature: f64,
    /// Maximum tokens in response
    pub max_tokens: u32,
}

impl AnthropicConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .context("ANTHROPIC_API_KEY environment variable not set")?;

        Ok(Self::new(api_key, "claude-sonnet-4-20250514".to_string()))
    }

    /// Create with custom settings
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            temperature: 0.1,
            max_tokens: 8192,
        }
    }
}

/// A tool the model is forced to call, used to get structured output
#[derive(Debug, Clone, Serialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

/// Anthropic API client
pub struct AnthropicClient {
    client: Client,
    config: AnthropicConfig,
}

impl AnthropicClient {
    pub fn new(config: AnthropicConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Send a message that must be answered with a call to `tool`,
    /// and decode the tool input as `T`
    pub async fn send_with_tool<T: DeserializeOwned>(
        &self,
        system: &str,
        user: &str,
        tool: Tool,
    ) -> Result<T> {
        let tool_name = tool.name.clone();

        let request = AnthropicToolRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            temperature: Some(self.config.temperature),
            system: Some(system.to_string()),
            messages: vec![Message {
                role: "user".to_string(),
                content: user.to_string(),
            }],
            tools: vec![tool],
            tool_choice: Some(ToolChoice {
                choice_type: "tool".to_string(),
                name: tool_name.clone(),
            }),
        };

        let response = self
            .client
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Anthropic API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Anthropic API error: {} - {}", status, body);
        }

        let response: AnthropicResponse = response
            .json()
            .await
            .context("Failed to parse Anthropic API response")?;

        let input = response
            .content
            .into_iter()
            .find(|c| c.content_type == "tool_use" && c.name.as_deref() == Some(tool_name.as_str()))
            .and_then(|c| c.input)
            .with_context(|| format!("No {} tool_use response found", tool_name))?;

        serde_json::from_value(input)
            .with_context(|| format!("Failed to parse {} tool input", tool_name))
    }
}

#[derive(Debug, Serialize)]
struct AnthropicToolRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<Message>,
    tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<ToolChoice>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ToolChoice {
    #[serde(rename = "type")]
    choice_type: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    input: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_request_serialization() {
        let request = AnthropicToolRequest {
            model: "m".to_string(),
            max_tokens: 10,
            temperature: None,
            system: None,
            messages: vec![],
            tools: vec![],
            tool_choice: Some(ToolChoice {
                choice_type: "tool".to_string(),
                name: "record".to_string(),
            }),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("temperature").is_none());
        assert_eq!(value["tool_choice"]["type"], "tool");
    }

    #[test]
    fn test_parse_tool_use_block() {
        let json = r#"{"content": [
            {"type": "text", "text": "calling tool"},
            {"type": "tool_use", "name": "record", "input": {"tasks": []}}
        ]}"#;
        let response: AnthropicResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.content.len(), 2);
        assert_eq!(response.content[1].name.as_deref(), Some("record"));
        assert!(response.content[1].input.is_some());
    }
}
