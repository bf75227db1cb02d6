use leptos::prelude::*;

use crate::profile::Profile;

#[component]
fn Avatar(name: String, photo_url: String, initials: String, captured: bool) -> impl IntoView {
	if photo_url.is_empty() {
		return view! { <div class="avatar avatar-initials">{initials}</div> }.into_any();
	}
	if captured {
		return view! {
			<div class="avatar">
				<img src=photo_url alt=name />
			</div>
		}
		.into_any();
	}
	// remote avatars (linkedin, github) refuse hotlinks that send a referrer
	view! {
		<div class="avatar">
			<img src=photo_url alt=name loading="lazy" referrerpolicy="no-referrer" />
		</div>
	}
	.into_any()
}

#[component]
pub fn ProfileCard(profile: Profile) -> impl IntoView {
	let initials = profile.initials();
	let subtitle = if profile.grad_year.is_empty() {
		profile.major.clone()
	} else {
		format!("{} · {}", profile.major, profile.grad_year)
	};
	let (github, linkedin, twitter, website_label) = (
		profile.github_url(),
		profile.linkedin_url(),
		profile.twitter_url(),
		profile.website_label(),
	);
	let website = profile.website.clone();
	let captured = profile.has_data_photo();

	view! {
		<div class="profile-card">
			<div class="profile-card-header">
				<Avatar name=profile.name.clone() photo_url=profile.photo_url.clone() initials=initials captured=captured />
				<div class="profile-card-title">
					<p class="profile-name">{profile.name}</p>
					<p class="profile-subtitle">{subtitle}</p>
				</div>
			</div>
			<p class="profile-building">{profile.building}</p>
			<div class="profile-links">
				{github
					.map(|href| {
						view! {
							<a href=href target="_blank" rel="noopener noreferrer" title="GitHub">
								"gh"
							</a>
						}
					})}
				{linkedin
					.map(|href| {
						view! {
							<a href=href target="_blank" rel="noopener noreferrer" title="LinkedIn">
								"in"
							</a>
						}
					})}
				{twitter
					.map(|href| {
						view! {
							<a href=href target="_blank" rel="noopener noreferrer" title="Twitter / X">
								"x"
							</a>
						}
					})}
				{website_label
					.map(|label| {
						view! {
							<a
								class="profile-website"
								href=website
								target="_blank"
								rel="noopener noreferrer"
							>
								{label}
							</a>
						}
					})}
			</div>
		</div>
	}
}
