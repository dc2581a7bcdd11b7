use serde::Deserialize;

pub const ALERT_THRESHOLD: f64 = 80.0;
pub const NORMAL_COLOR: &str = "#00ff00";
pub const ALERT_COLOR: &str = "#ff0000";

/// Latest `updateResources` payload. Last write wins.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq)]
pub struct ResourceSnapshot {
	pub cpu: f64,
	pub ram: f64,
	pub credits: i64,
	pub trace: f64,
}

pub fn alert(value: f64) -> bool {
	value > ALERT_THRESHOLD
}

#[derive(Clone, Debug, PartialEq)]
pub struct Gauge {
	pub label: String,
	/// Bar fill in `0.0..=1.0`.
	pub fill: f64,
	pub alert: bool,
}

impl Gauge {
	fn percent(name: &str, value: f64, alerting: bool) -> Self {
		Self {
			label: format!("{name}: {value}%"),
			fill: (value / 100.0).clamp(0.0, 1.0),
			alert: alerting && alert(value),
		}
	}

	pub fn color(&self) -> &'static str {
		if self.alert { ALERT_COLOR } else { NORMAL_COLOR }
	}
}

impl ResourceSnapshot {
	pub fn cpu_gauge(&self) -> Gauge {
		Gauge::percent("CPU", self.cpu, true)
	}

	pub fn ram_gauge(&self) -> Gauge {
		Gauge::percent("RAM", self.ram, true)
	}

	pub fn trace_gauge(&self) -> Gauge {
		Gauge::percent("Trace", self.trace, false)
	}

	pub fn credits_label(&self) -> String {
		format!("Credits: {}", self.credits)
	}
}
