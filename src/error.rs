use thiserror::Error;

/// Failures talking to the game backend.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ApiError {
	/// The request never produced a response.
	#[error("network error: {0}")]
	Transport(String),
	/// The backend answered with `success: false`.
	#[error("{0}")]
	Rejected(String),
	/// The body was not the JSON we expected.
	#[error("malformed response: {0}")]
	Decode(String),
}

impl From<gloo_net::Error> for ApiError {
	fn from(err: gloo_net::Error) -> Self {
		match err {
			gloo_net::Error::SerdeError(e) => Self::Decode(e.to_string()),
			other => Self::Transport(other.to_string()),
		}
	}
}
