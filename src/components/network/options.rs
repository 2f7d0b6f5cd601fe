use std::fmt;
use std::str::FromStr;

/// Decides whether the configurator exposes an option, given its name and
/// dotted path.
pub type ConfigureFilter = fn(option: &str, path: &str) -> bool;

/// Exposes only edge-smoothing options.
pub fn show_smooth_option(option: &str, path: &str) -> bool {
	path.contains("smooth") || option == "smooth"
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SmoothKind {
	#[default]
	Continuous,
	CurvedCw,
	CurvedCcw,
}

impl SmoothKind {
	pub const ALL: [SmoothKind; 3] = [
		SmoothKind::Continuous,
		SmoothKind::CurvedCw,
		SmoothKind::CurvedCcw,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			SmoothKind::Continuous => "continuous",
			SmoothKind::CurvedCw => "curvedCW",
			SmoothKind::CurvedCcw => "curvedCCW",
		}
	}
}

impl fmt::Display for SmoothKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for SmoothKind {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|k| k.as_str() == s)
			.ok_or_else(|| format!("unknown smooth type `{s}`"))
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothOptions {
	pub enabled: bool,
	pub kind: SmoothKind,
	/// Bend strength in `[0, 1]`.
	pub roundness: f64,
}

impl Default for SmoothOptions {
	fn default() -> Self {
		Self {
			enabled: true,
			kind: SmoothKind::Continuous,
			roundness: 0.5,
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeOptions {
	pub smooth: SmoothOptions,
}

/// Fixed configuration handed to the network renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderOptions {
	pub physics: bool,
	pub edges: EdgeOptions,
	/// Which options the configurator panel shows; `None` hides the panel.
	pub configure: Option<ConfigureFilter>,
}

impl Default for RenderOptions {
	fn default() -> Self {
		Self {
			physics: true,
			edges: EdgeOptions::default(),
			configure: Some(show_smooth_option),
		}
	}
}

/// An adjustable option as listed by the configurator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfigOption {
	pub name: &'static str,
	pub path: &'static str,
}

/// Every option the configurator knows how to edit.
pub const OPTION_CATALOGUE: &[ConfigOption] = &[
	ConfigOption { name: "enabled", path: "edges.smooth" },
	ConfigOption { name: "type", path: "edges.smooth" },
	ConfigOption { name: "roundness", path: "edges.smooth" },
];

impl RenderOptions {
	/// Catalogue entries accepted by `configure`.
	pub fn exposed_options(&self) -> Vec<ConfigOption> {
		let Some(filter) = self.configure else {
			return Vec::new();
		};
		OPTION_CATALOGUE
			.iter()
			.copied()
			.filter(|o| filter(o.name, o.path))
			.collect()
	}
}
