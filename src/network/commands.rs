//! Context-menu vocabulary and the completion payloads the terminal publishes.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandVerb {
	Scan,
	Ping,
	Connect,
	Cat,
}

impl CommandVerb {
	/// Order shown in the context menu.
	pub const VOCABULARY: [CommandVerb; 4] = [Self::Scan, Self::Ping, Self::Connect, Self::Cat];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Scan => "scan",
			Self::Ping => "ping",
			Self::Connect => "connect",
			Self::Cat => "cat",
		}
	}

	/// The text written into the terminal input.
	pub fn command_line(self, target: &str) -> String {
		format!("{} {}", self.as_str(), target)
	}
}

impl fmt::Display for CommandVerb {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct PendingCommand {
	pub target: String,
	pub verb: CommandVerb,
	/// Milliseconds, as reported by `js_sys::Date::now`.
	pub issued_at: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CommandResult {
	FileContent(String),
	/// Anything else; carries the raw `type` tag when there was one.
	Other(Option<String>),
}

impl CommandResult {
	pub fn from_data(data: &Value) -> Self {
		let kind = data.get("type").and_then(Value::as_str);
		match kind {
			Some("file_content") => Self::FileContent(
				data.get("content")
					.and_then(Value::as_str)
					.unwrap_or_default()
					.to_string(),
			),
			other => Self::Other(other.map(str::to_string)),
		}
	}
}

/// Payload of the `commandSuccess` channel: `{data: {type, content?, ...}}`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct CommandCompletion {
	#[serde(default)]
	pub data: Value,
}

impl CommandCompletion {
	pub fn result(&self) -> CommandResult {
		CommandResult::from_data(&self.data)
	}
}
