//! Client defaults and the handful of values kept in `localStorage`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Same-origin backend.
pub const API_BASE: &str = "";
pub const NETWORK_POLL_INTERVAL: Duration = Duration::from_secs(5);
pub const PVP_POLL_INTERVAL: Duration = Duration::from_secs(3);
pub const DEFAULT_PLAYER: &str = "test_user";

pub const KEY_UI_LAYOUT: &str = "nexus_ui_layout";
pub const KEY_FONT_SIZE: &str = "nexus_font_size";
pub const KEY_PLAYER_NAME: &str = "playerName";
pub const KEY_SESSION_TOKEN: &str = "sessionToken";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiLayout {
	#[default]
	Default,
	Compact,
	Wide,
}

impl UiLayout {
	pub fn next(self) -> Self {
		match self {
			Self::Default => Self::Compact,
			Self::Compact => Self::Wide,
			Self::Wide => Self::Default,
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontSize {
	Small,
	#[default]
	Medium,
	Large,
}

impl FontSize {
	pub fn next(self) -> Self {
		match self {
			Self::Small => Self::Medium,
			Self::Medium => Self::Large,
			Self::Large => Self::Small,
		}
	}

	pub fn px(self) -> u32 {
		match self {
			Self::Small => 12,
			Self::Medium => 16,
			Self::Large => 20,
		}
	}
}

fn storage() -> Option<web_sys::Storage> {
	web_sys::window()?.local_storage().ok().flatten()
}

fn read(key: &str) -> Option<String> {
	storage()?.get_item(key).ok().flatten()
}

fn write(key: &str, value: &str) {
	if let Some(store) = storage() {
		if store.set_item(key, value).is_err() {
			log::warn!("could not persist {key}");
		}
	}
}

/// Stored as JSON strings; anything unreadable falls back to the default.
fn read_json<T: for<'de> Deserialize<'de> + Default>(key: &str) -> T {
	read(key)
		.and_then(|raw| serde_json::from_str(&raw).ok())
		.unwrap_or_default()
}

fn write_json<T: Serialize>(key: &str, value: &T) {
	if let Ok(raw) = serde_json::to_string(value) {
		write(key, &raw);
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Settings {
	pub layout: UiLayout,
	pub font_size: FontSize,
}

impl Settings {
	pub fn load() -> Self {
		Self {
			layout: read_json(KEY_UI_LAYOUT),
			font_size: read_json(KEY_FONT_SIZE),
		}
	}

	pub fn save(&self) {
		write_json(KEY_UI_LAYOUT, &self.layout);
		write_json(KEY_FONT_SIZE, &self.font_size);
	}

	/// Class list of the app root.
	pub fn class_name(&self) -> String {
		format!("app layout-{:?}", self.layout).to_lowercase()
	}

	pub fn root_style(&self) -> String {
		format!("font-size: {}px;", self.font_size.px())
	}
}

pub fn player_name() -> String {
	read(KEY_PLAYER_NAME)
		.filter(|name| !name.is_empty())
		.unwrap_or_else(|| DEFAULT_PLAYER.to_string())
}

pub fn store_session(player: &str, token: &str) {
	write(KEY_SESSION_TOKEN, token);
	write(KEY_PLAYER_NAME, player);
}
