use leptos::prelude::*;

use crate::components::topic_graph::{Category, Edge, GraphData, Node, TopicGraphCanvas};

/// Build a canned topic graph in the shape the AI generator produces:
/// one central topic, factors hanging below it, a deeper tail, one
/// same-level connector and one edge pointing at a node that does not
/// exist (the generator occasionally does that too).
fn sample_topic_graph() -> GraphData {
	let nodes = vec![
		Node::new("ocean-plastic", "Ocean plastic pollution", Category::Central)
			.with_summary("Accumulation of plastic waste in marine environments."),
		Node::new("packaging", "Single-use packaging", Category::Cause)
			.with_impact(-0.8)
			.with_sources(vec!["UNEP 2024 marine litter report".into()]),
		Node::new("fishing-gear", "Lost fishing gear", Category::Cause).with_impact(-0.5),
		Node::new("policy", "Plastic bans", Category::Context)
			.with_impact(0.6)
			.with_summary("National and municipal restrictions on single-use plastics."),
		Node::new("cleanup-tech", "Cleanup technology", Category::Trend).with_impact(0.5),
		Node::new("food-chain", "Food chain contamination", Category::Effect).with_impact(-0.7),
		Node::new("recycling-rates", "Low recycling rates", Category::Cause).with_impact(-0.4),
		Node::new("single-use-bans", "Single-use bans", Category::Context).with_impact(0.7),
		Node::new("microplastics", "Microplastic spread", Category::Trend)
			.with_impact(-0.6)
			.with_sources(vec!["Nature 2023 microplastics survey".into()]),
		Node::new("fisheries", "Fisheries decline", Category::Effect).with_impact(-0.5),
		Node::new("human-health", "Human health risks", Category::Effect).with_impact(-0.4),
	];
	let edges = vec![
		Edge::new("packaging", "ocean-plastic").with_relationship("drives"),
		Edge::new("fishing-gear", "ocean-plastic").with_relationship("drives"),
		Edge::new("policy", "ocean-plastic")
			.with_relationship("mitigates")
			.with_strength(0.4),
		Edge::new("cleanup-tech", "ocean-plastic")
			.with_relationship("mitigates")
			.with_strength(0.3),
		Edge::new("food-chain", "ocean-plastic").with_relationship("results in"),
		Edge::new("recycling-rates", "packaging").with_relationship("worsens"),
		Edge::new("single-use-bans", "packaging").with_relationship("reduces"),
		Edge::new("microplastics", "food-chain").with_relationship("spreads through"),
		Edge::new("fisheries", "food-chain").with_relationship("suffers from"),
		Edge::new("human-health", "microplastics").with_relationship("exposed via"),
		// Same-level connector, kept out of the tree layout.
		Edge::new("single-use-bans", "recycling-rates")
			.with_relationship("improves")
			.with_strength(0.4),
		// The generator sometimes references nodes it never produced.
		Edge::new("seabed-survey", "ocean-plastic"),
	];
	GraphData { nodes, edges }
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let graph_data = Signal::derive(sample_topic_graph);
	let show_all = RwSignal::new(false);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<TopicGraphCanvas data=graph_data show_all=show_all fullscreen=true />
				<div class="graph-overlay">
					<h1>"Ocean Plastic Pollution"</h1>
					<p class="subtitle">
						"Click a node to expand or collapse it. Scroll to zoom. Drag to pan."
					</p>
					<button on:click=move |_| show_all.update(|v| *v = !*v)>
						{move || if show_all.get() { "Back to overview" } else { "Show all nodes" }}
					</button>
				</div>
			</div>
		</ErrorBoundary>
	}
}
