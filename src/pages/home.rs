use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::components::directory::Directory;
use crate::components::hero::Hero;
use crate::config::StoreConfig;
use crate::profile::Profile;
use crate::store::load_directory;
use crate::BRAND;

/// Landing page: typed hero with the network graph, then the directory.
#[component]
pub fn Home() -> impl IntoView {
	let profiles = RwSignal::new(Vec::<Profile>::new());
	let loaded = RwSignal::new(false);

	// an unreachable or unconfigured sheet comes back as an empty list
	spawn_local(async move {
		profiles.set(load_directory(StoreConfig::from_build_env()).await);
		loaded.set(true);
	});

	view! {
		<main class="page">
			<nav class="nav">
				<span class="brand">{BRAND}</span>
				<A href="/join" attr:class="nav-link">
					"join →"
				</A>
			</nav>

			<Hero profiles=profiles loaded=loaded />

			<section id="directory" class="directory-section">
				<Show
					when=move || loaded.get()
					fallback=|| view! { <p class="muted">"// loading..."</p> }
				>
					<Directory profiles=profiles />
				</Show>
			</section>

			<footer class="footer">
				<span class="brand dim">{BRAND}</span>
				" · "
				<A href="/join">"add yourself"</A>
			</footer>
		</main>
	}
}
