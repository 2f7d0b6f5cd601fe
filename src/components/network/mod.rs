mod component;
mod config_panel;
mod options;
mod render;
mod state;

pub use component::NetworkCanvas;
pub use config_panel::ConfigPanel;
pub use options::{
	ConfigOption, ConfigureFilter, EdgeOptions, OPTION_CATALOGUE, RenderOptions, SmoothKind,
	SmoothOptions, show_smooth_option,
};
