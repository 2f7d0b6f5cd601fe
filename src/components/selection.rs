use leptos::prelude::*;

/// A `<select>` over `choices`. Writes `None` while the placeholder is chosen.
#[component]
pub fn SelectionList(
	#[prop(into)] id: String,
	#[prop(into)] label: String,
	choices: Vec<String>,
	selected: RwSignal<Option<String>>,
) -> impl IntoView {
	let on_change = move |ev: leptos::ev::Event| {
		let value = event_target_value(&ev);
		selected.set((!value.is_empty()).then_some(value));
	};

	view! {
		<label class="selection">
			{label}
			<select id=id on:change=on_change>
				<option value="" selected=true disabled=true hidden=true>
					"Choose page"
				</option>
				{choices
					.into_iter()
					.map(|choice| {
						let text = choice.clone();
						view! { <option value=choice>{text}</option> }
					})
					.collect_view()}
			</select>
		</label>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn builds_one_option_per_choice_without_selecting() {
		let owner = Owner::new();
		owner.with(|| {
			let selected = RwSignal::new(None::<String>);
			let _view = view! {
				<SelectionList
					id="list1"
					label="From "
					choices=vec!["/wiki/Astronomy".to_string(), "/wiki/Star".to_string()]
					selected=selected
				/>
			};
			assert_eq!(selected.get_untracked(), None);
		});
	}
}
