use leptos::prelude::*;
use leptos_router::components::A;

/// 404 page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<main class="page centered">
			<p class="eyebrow">"// 404"</p>
			<p class="hero-title">"nothing here."</p>
			<A href="/" attr:class="accent-link">
				"← back to directory"
			</A>
		</main>
	}
}
