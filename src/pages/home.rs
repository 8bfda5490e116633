use leptos::prelude::*;

use crate::components::network_view::{
	KinaseInfo, LayoutOptions, NestedProtein, NetworkData, NetworkView, ProteinInfo,
};

fn kinase(name: &str, is_group: bool, mutations: Option<f64>) -> KinaseInfo {
	KinaseInfo {
		name: name.to_string(),
		is_group,
		protein: mutations.map(|mutations_count| NestedProtein { mutations_count }),
		color: None,
	}
}

/// Sample network of TP53 and kinases phosphorylating it.
fn sample_network() -> NetworkData {
	NetworkData {
		protein: ProteinInfo {
			name: "TP53".into(),
			mutations_count: 1243.0,
		},
		kinases: vec![
			kinase("ATM", false, Some(312.0)),
			kinase("ATR", false, Some(140.0)),
			kinase("CHEK1", false, Some(35.0)),
			kinase("CHEK2", false, Some(61.0)),
			kinase("CDK", true, None),
			kinase("CK1", true, None),
			kinase("HIPK2", false, Some(18.0)),
			kinase("DYRK2", false, Some(9.0)),
			kinase("AURKA", false, Some(27.0)),
			kinase("PLK3", false, None),
			kinase("MAPK", true, None),
		],
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let network = Signal::derive(sample_network);
	let options = LayoutOptions {
		ratio: 0.75,
		..Default::default()
	};

	view! {
		<div class="network-page">
			<h1>"Kinase network"</h1>
			<p class="subtitle">"Drag nodes to reposition. Circle size follows the number of mutations."</p>
			<NetworkView data=network options=options />
		</div>
	}
}
