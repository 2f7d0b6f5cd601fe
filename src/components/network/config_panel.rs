use leptos::prelude::*;

use super::options::{ConfigOption, RenderOptions, SmoothKind};

/// The editor used for one catalogue entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Control {
	SmoothToggle,
	KindSelect,
	Roundness,
}

fn control_for(option: ConfigOption) -> Option<Control> {
	match (option.path, option.name) {
		("edges.smooth", "enabled") => Some(Control::SmoothToggle),
		("edges.smooth", "type") => Some(Control::KindSelect),
		("edges.smooth", "roundness") => Some(Control::Roundness),
		_ => None,
	}
}

fn option_control(option: ConfigOption, options: RwSignal<RenderOptions>) -> Option<AnyView> {
	let view = match control_for(option)? {
		Control::SmoothToggle => view! {
			<label>
				<input
					type="checkbox"
					prop:checked=move || options.with(|o| o.edges.smooth.enabled)
					on:change=move |ev| {
						let on = event_target_checked(&ev);
						options.update(|o| o.edges.smooth.enabled = on);
					}
				/>
				" smooth edges"
			</label>
		}
		.into_any(),
		Control::KindSelect => view! {
			<label>
				"type "
				<select on:change=move |ev| {
					if let Ok(kind) = event_target_value(&ev).parse::<SmoothKind>() {
						options.update(|o| o.edges.smooth.kind = kind);
					}
				}>
					{SmoothKind::ALL
						.into_iter()
						.map(|kind| {
							view! {
								<option
									value=kind.as_str()
									selected=move || options.with(|o| o.edges.smooth.kind == kind)
								>
									{kind.as_str()}
								</option>
							}
						})
						.collect_view()}
				</select>
			</label>
		}
		.into_any(),
		Control::Roundness => view! {
			<label>
				"roundness "
				<input
					type="range"
					min="0"
					max="1"
					step="0.05"
					prop:value=move || options.with(|o| o.edges.smooth.roundness.to_string())
					on:input=move |ev| {
						if let Ok(r) = event_target_value(&ev).parse::<f64>() {
							options.update(|o| o.edges.smooth.roundness = r.clamp(0.0, 1.0));
						}
					}
				/>
			</label>
		}
		.into_any(),
	};
	Some(view)
}

/// Lists the render options that the `configure` filter exposes.
#[component]
pub fn ConfigPanel(options: RwSignal<RenderOptions>) -> impl IntoView {
	let exposed = options.with_untracked(RenderOptions::exposed_options);
	(!exposed.is_empty()).then(|| {
		view! {
			<fieldset class="network-configure">
				<legend>"Edges"</legend>
				{exposed
					.into_iter()
					.filter_map(|option| option_control(option, options))
					.collect_view()}
			</fieldset>
		}
	})
}
