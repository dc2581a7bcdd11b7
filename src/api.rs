//! HTTP client for the game backend.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::network::model::MissionDescription;

/// `{success, data} | {success: false, error}`.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
	success: bool,
	#[serde(default = "Option::default")]
	data: Option<T>,
	#[serde(default)]
	error: Option<String>,
}

impl<T> Envelope<T> {
	fn into_result(self) -> Result<T, ApiError> {
		match (self.success, self.data) {
			(true, Some(data)) => Ok(data),
			(true, None) => Err(ApiError::Decode("missing data".into())),
			(false, _) => Err(rejected(self.error)),
		}
	}
}

fn rejected(error: Option<String>) -> ApiError {
	ApiError::Rejected(error.unwrap_or_else(|| "request failed".into()))
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct PlayerState {
	#[serde(default)]
	pub active_missions: Vec<MissionDescription>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TeamMember {
	pub name: String,
	pub status: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct PvpState {
	#[serde(default)]
	pub team_a: Vec<TeamMember>,
	#[serde(default)]
	pub team_b: Vec<TeamMember>,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
	username: &'a str,
	password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
	success: bool,
	#[serde(default)]
	token: Option<String>,
	#[serde(default)]
	error: Option<String>,
}

#[derive(Debug, Serialize)]
struct CommandRequest<'a> {
	player_name: &'a str,
	command: &'a str,
}

/// Body of `/api/command/execute`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct CommandResponse {
	pub success: bool,
	#[serde(default)]
	pub output: String,
	#[serde(default)]
	pub error: Option<String>,
	#[serde(default)]
	pub execution_time_ms: Option<f64>,
	#[serde(default)]
	pub data: Value,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ApiClient {
	base_url: String,
}

impl ApiClient {
	pub fn new(base_url: &str) -> Self {
		Self {
			base_url: base_url.trim_end_matches('/').to_string(),
		}
	}

	fn url(&self, path: &str) -> String {
		format!("{}{}", self.base_url, path)
	}

	async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
		let response = Request::get(&self.url(path)).send().await?;
		decode::<Envelope<T>>(response).await?.into_result()
	}

	/// Every mission the player holds, listed on the main menu.
	pub async fn missions(&self, player: &str) -> Result<Vec<MissionDescription>, ApiError> {
		self.get(&format!("/api/player/{}/missions", encode(player)))
			.await
	}

	pub async fn player_state(&self, player: &str) -> Result<PlayerState, ApiError> {
		self.get(&format!("/api/player/{}/state", encode(player)))
			.await
	}

	/// The mission the network view shows: the player's first active one.
	pub async fn active_mission(&self, player: &str) -> Result<Option<MissionDescription>, ApiError> {
		let state = self.player_state(player).await?;
		Ok(state.active_missions.into_iter().next())
	}

	pub async fn pvp_state(&self) -> Result<PvpState, ApiError> {
		self.get("/api/pvp/state").await
	}

	/// Returns the session token.
	pub async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
		let response = Request::post(&self.url("/api/login"))
			.json(&LoginRequest { username, password })?
			.send()
			.await?;
		let body: LoginResponse = decode(response).await?;
		match (body.success, body.token) {
			(true, Some(token)) => Ok(token),
			(true, None) => Err(ApiError::Decode("missing token".into())),
			(false, _) => Err(rejected(body.error)),
		}
	}

	pub async fn execute_command(&self, player: &str, command: &str) -> Result<CommandResponse, ApiError> {
		let response = Request::post(&self.url("/api/command/execute"))
			.json(&CommandRequest {
				player_name: player,
				command,
			})?
			.send()
			.await?;
		let body: CommandResponse = decode(response).await?;
		if body.success {
			Ok(body)
		} else {
			Err(rejected(body.error))
		}
	}
}

/// Application errors come back with 4xx codes but still carry a JSON body,
/// so the body is decoded regardless of status.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
	let status = response.status();
	let text = response.text().await?;
	serde_json::from_str(&text).map_err(|e| {
		if (200..300).contains(&status) {
			ApiError::Decode(e.to_string())
		} else {
			ApiError::Transport(format!("HTTP {status}"))
		}
	})
}

fn encode(segment: &str) -> String {
	String::from(js_sys::encode_uri_component(segment))
}
