//! View state of the network scene and its transition function.
//!
//! The canvas component owns one [`ViewState`], feeds it [`ViewEvent`]s from
//! pointer input, the poller and the completion channel, and carries out the
//! returned [`SceneEffect`]s. Nothing here touches the DOM or the network.

use std::collections::VecDeque;

use log::{debug, warn};

use super::builder;
use super::commands::{CommandCompletion, CommandResult, CommandVerb, PendingCommand};
use super::model::{Mission, MissionDescription};
use crate::error::ApiError;

/// The single overlay slot. Opening anything replaces what is there.
#[derive(Clone, Debug, PartialEq)]
pub enum Overlay {
	ContextMenu { target: String, x: f64, y: f64 },
	FileViewer { content: String },
}

#[derive(Clone, Debug)]
pub enum ViewEvent {
	/// Result of a poll cycle. `Ok(None)` means the player has no active mission.
	Synced(Result<Option<MissionDescription>, ApiError>),
	/// Primary press on a node.
	Press(usize),
	/// Secondary press on a node at screen coordinates.
	OpenMenu { node: usize, x: f64, y: f64 },
	/// A context-menu entry was chosen.
	Select { verb: CommandVerb, now: f64 },
	CloseOverlay,
	CommandCompleted(CommandCompletion),
	TearDown,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SceneEffect {
	/// Replace the terminal input with this line.
	WriteCommandLine(String),
	/// Start a poll cycle now.
	RequestSync,
}

/// Commands kept waiting for a completion. Completions carry no correlation id
/// and some commands never report one, so the oldest entries are dropped.
pub const MAX_PENDING: usize = 16;

#[derive(Clone, Debug, Default)]
pub struct ViewState {
	mission: Option<Mission>,
	overlay: Option<Overlay>,
	/// Issued commands, oldest first, at most [`MAX_PENDING`]. Rebuilds leave it
	/// alone since a completion's own refresh lands before later completions.
	pending: VecDeque<PendingCommand>,
	last_error: Option<String>,
	/// Bumped on every successful rebuild.
	generation: u64,
	synced: bool,
	torn_down: bool,
}

impl ViewState {
	pub fn mission(&self) -> Option<&Mission> {
		self.mission.as_ref()
	}

	pub fn overlay(&self) -> Option<&Overlay> {
		self.overlay.as_ref()
	}

	#[cfg(test)]
	pub fn pending(&self) -> impl Iterator<Item = &PendingCommand> {
		self.pending.iter()
	}

	#[cfg(test)]
	pub fn last_error(&self) -> Option<&str> {
		self.last_error.as_deref()
	}

	pub fn generation(&self) -> u64 {
		self.generation
	}

	pub fn is_torn_down(&self) -> bool {
		self.torn_down
	}

	/// One-line summary for the header.
	pub fn status_line(&self) -> String {
		let base = match (&self.mission, self.synced) {
			(Some(m), _) => format!("Mission: {} ({})", m.title, m.status),
			(None, true) => "No active mission".to_string(),
			(None, false) => "Connecting...".to_string(),
		};
		match &self.last_error {
			Some(err) => format!("{base} | sync failed: {err}"),
			None => base,
		}
	}

	pub fn reduce(&mut self, event: ViewEvent) -> Vec<SceneEffect> {
		if self.torn_down {
			return Vec::new();
		}
		match event {
			ViewEvent::Synced(Ok(desc)) => {
				self.mission = desc.as_ref().map(builder::build);
				self.generation += 1;
				self.synced = true;
				self.last_error = None;
				// menus point into the old arena
				if matches!(self.overlay, Some(Overlay::ContextMenu { .. })) {
					self.overlay = None;
				}
				debug!(
					"rebuilt network graph: generation {}, {} nodes",
					self.generation,
					self.mission.as_ref().map_or(0, Mission::len)
				);
				Vec::new()
			}
			ViewEvent::Synced(Err(err)) => {
				warn!("network sync failed, keeping previous graph: {err}");
				self.last_error = Some(err.to_string());
				Vec::new()
			}
			ViewEvent::Press(node) => {
				if let Some(mission) = self.mission.as_mut() {
					mission.toggle(node);
				}
				Vec::new()
			}
			ViewEvent::OpenMenu { node, x, y } => {
				let target = self
					.mission
					.as_ref()
					.filter(|m| m.is_shown(node))
					.and_then(|m| m.node(node))
					.map(|n| n.name.clone());
				if let Some(target) = target {
					self.overlay = Some(Overlay::ContextMenu { target, x, y });
				}
				Vec::new()
			}
			ViewEvent::Select { verb, now } => {
				if !matches!(self.overlay, Some(Overlay::ContextMenu { .. })) {
					return Vec::new();
				}
				let Some(Overlay::ContextMenu { target, .. }) = self.overlay.take() else {
					return Vec::new();
				};
				let line = verb.command_line(&target);
				self.pending.push_back(PendingCommand {
					target,
					verb,
					issued_at: now,
				});
				while self.pending.len() > MAX_PENDING {
					if let Some(dropped) = self.pending.pop_front() {
						debug!("no completion for `{} {}`, dropping it", dropped.verb, dropped.target);
					}
				}
				vec![SceneEffect::WriteCommandLine(line)]
			}
			ViewEvent::CloseOverlay => {
				self.overlay = None;
				Vec::new()
			}
			ViewEvent::CommandCompleted(completion) => {
				// No correlation id: the oldest outstanding command is taken as done.
				if let Some(done) = self.pending.pop_front() {
					debug!(
						"`{} {}` issued at {} completed",
						done.verb, done.target, done.issued_at
					);
				}
				match completion.result() {
					CommandResult::FileContent(content) => {
						self.overlay = Some(Overlay::FileViewer { content });
					}
					CommandResult::Other(kind) => debug!("completion {kind:?}, refreshing only"),
				}
				vec![SceneEffect::RequestSync]
			}
			ViewEvent::TearDown => {
				self.overlay = None;
				self.pending.clear();
				self.torn_down = true;
				Vec::new()
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::network::builder::tests::infiltrate_corp;

	fn synced() -> ViewState {
		let mut state = ViewState::default();
		state.reduce(ViewEvent::Synced(Ok(Some(infiltrate_corp()))));
		state
	}

	fn completion(json: &str) -> CommandCompletion {
		serde_json::from_str(json).unwrap()
	}

	#[test]
	fn sync_builds_the_scenario_tree() {
		let state = synced();
		let m = state.mission().unwrap();
		assert_eq!(m.len(), 3);
		assert_eq!(state.generation(), 1);
		assert_eq!(state.status_line(), "Mission: Infiltrate Corp (active)");
	}

	#[test]
	fn press_toggles_children() {
		let mut state = synced();
		let gateway = state.mission().unwrap().find("Gateway").unwrap();
		let fw1 = state.mission().unwrap().find("FW1").unwrap();
		state.reduce(ViewEvent::Press(gateway));
		assert!(state.mission().unwrap().is_shown(fw1));
		state.reduce(ViewEvent::Press(gateway));
		assert!(!state.mission().unwrap().is_shown(fw1));
	}

	#[test]
	fn only_one_context_menu() {
		let mut state = synced();
		state.reduce(ViewEvent::OpenMenu { node: 0, x: 1.0, y: 2.0 });
		state.reduce(ViewEvent::OpenMenu { node: 1, x: 5.0, y: 6.0 });
		assert_eq!(
			state.overlay(),
			Some(&Overlay::ContextMenu {
				target: "Gateway".into(),
				x: 5.0,
				y: 6.0
			})
		);
	}

	#[test]
	fn menu_on_hidden_node_is_ignored() {
		let mut state = synced();
		let fw1 = state.mission().unwrap().find("FW1").unwrap();
		state.reduce(ViewEvent::OpenMenu { node: fw1, x: 0.0, y: 0.0 });
		assert!(state.overlay().is_none());
	}

	#[test]
	fn select_writes_command_line_and_closes_menu() {
		let mut state = synced();
		state.reduce(ViewEvent::OpenMenu { node: 1, x: 0.0, y: 0.0 });
		let effects = state.reduce(ViewEvent::Select {
			verb: CommandVerb::Scan,
			now: 42.0,
		});
		assert_eq!(effects, vec![SceneEffect::WriteCommandLine("scan Gateway".into())]);
		assert!(state.overlay().is_none());
		let pending: Vec<_> = state.pending().collect();
		assert_eq!(pending.len(), 1);
		assert_eq!(pending[0].issued_at, 42.0);
	}

	#[test]
	fn select_without_menu_does_nothing() {
		let mut state = synced();
		let effects = state.reduce(ViewEvent::Select {
			verb: CommandVerb::Ping,
			now: 0.0,
		});
		assert!(effects.is_empty());
		assert_eq!(state.pending().count(), 0);
	}

	#[test]
	fn file_content_completion_opens_viewer_and_syncs() {
		let mut state = synced();
		state.reduce(ViewEvent::OpenMenu { node: 1, x: 0.0, y: 0.0 });
		let effects = state.reduce(ViewEvent::CommandCompleted(completion(
			r#"{"data": {"type": "file_content", "content": "secret.txt"}}"#,
		)));
		assert_eq!(effects, vec![SceneEffect::RequestSync]);
		assert_eq!(
			state.overlay(),
			Some(&Overlay::FileViewer {
				content: "secret.txt".into()
			})
		);
	}

	#[test]
	fn other_completion_only_syncs() {
		let mut state = synced();
		let effects = state.reduce(ViewEvent::CommandCompleted(completion(
			r#"{"data": {"type": "scan_result"}}"#,
		)));
		assert_eq!(effects, vec![SceneEffect::RequestSync]);
		assert!(state.overlay().is_none());
	}

	#[test]
	fn completion_resolves_oldest_pending() {
		let mut state = synced();
		for verb in [CommandVerb::Scan, CommandVerb::Ping] {
			state.reduce(ViewEvent::OpenMenu { node: 1, x: 0.0, y: 0.0 });
			state.reduce(ViewEvent::Select { verb, now: 0.0 });
		}
		state.reduce(ViewEvent::CommandCompleted(CommandCompletion::default()));
		let left: Vec<_> = state.pending().map(|p| p.verb).collect();
		assert_eq!(left, vec![CommandVerb::Ping]);
	}

	#[test]
	fn pending_queue_is_capped_at_oldest() {
		let mut state = synced();
		for i in 0..MAX_PENDING + 3 {
			state.reduce(ViewEvent::OpenMenu { node: 1, x: 0.0, y: 0.0 });
			state.reduce(ViewEvent::Select {
				verb: CommandVerb::Ping,
				now: i as f64,
			});
		}
		let issued: Vec<_> = state.pending().map(|p| p.issued_at).collect();
		assert_eq!(issued.len(), MAX_PENDING);
		assert_eq!(issued[0], 3.0);
		assert_eq!(issued[MAX_PENDING - 1], (MAX_PENDING + 2) as f64);
	}

	#[test]
	fn rebuild_keeps_pending_commands() {
		let mut state = synced();
		state.reduce(ViewEvent::OpenMenu { node: 1, x: 0.0, y: 0.0 });
		state.reduce(ViewEvent::Select {
			verb: CommandVerb::Cat,
			now: 0.0,
		});
		state.reduce(ViewEvent::Synced(Ok(Some(infiltrate_corp()))));
		assert_eq!(state.pending().count(), 1);
	}

	#[test]
	fn failed_sync_keeps_previous_graph() {
		let mut state = synced();
		let gateway = state.mission().unwrap().find("Gateway").unwrap();
		state.reduce(ViewEvent::Press(gateway));
		let before = state.mission().cloned();
		state.reduce(ViewEvent::Synced(Err(ApiError::Transport("offline".into()))));
		assert_eq!(state.mission().cloned(), before);
		assert_eq!(state.generation(), 1);
		assert!(state.status_line().contains("sync failed: network error: offline"));
	}

	#[test]
	fn rebuild_replaces_tree_and_drops_expand_state() {
		let mut state = synced();
		let gateway = state.mission().unwrap().find("Gateway").unwrap();
		state.reduce(ViewEvent::Press(gateway));
		state.reduce(ViewEvent::OpenMenu { node: 0, x: 0.0, y: 0.0 });
		state.reduce(ViewEvent::Synced(Ok(Some(infiltrate_corp()))));
		let m = state.mission().unwrap();
		assert_eq!(m.len(), 3);
		assert_eq!(m.shown().count(), 2);
		assert!(state.overlay().is_none());
		assert_eq!(state.generation(), 2);
	}

	#[test]
	fn rebuild_keeps_file_viewer_open() {
		let mut state = synced();
		state.reduce(ViewEvent::CommandCompleted(completion(
			r#"{"data": {"type": "file_content", "content": "x"}}"#,
		)));
		state.reduce(ViewEvent::Synced(Ok(Some(infiltrate_corp()))));
		assert!(matches!(state.overlay(), Some(Overlay::FileViewer { .. })));
	}

	#[test]
	fn no_active_mission_clears_graph() {
		let mut state = synced();
		state.reduce(ViewEvent::Synced(Ok(None)));
		assert!(state.mission().is_none());
		assert_eq!(state.status_line(), "No active mission");
	}

	#[test]
	fn teardown_drops_everything_and_ignores_late_results() {
		let mut state = synced();
		state.reduce(ViewEvent::OpenMenu { node: 1, x: 0.0, y: 0.0 });
		state.reduce(ViewEvent::Select {
			verb: CommandVerb::Connect,
			now: 0.0,
		});
		state.reduce(ViewEvent::TearDown);
		assert!(state.is_torn_down());
		assert_eq!(state.pending().count(), 0);
		let effects = state.reduce(ViewEvent::CommandCompleted(CommandCompletion::default()));
		assert!(effects.is_empty());
		state.reduce(ViewEvent::Synced(Ok(None)));
		assert!(state.mission().is_some());
	}
}
