use leptos::prelude::*;
use leptos_router::components::A;

use crate::BRAND;
use crate::components::photo_capture::PhotoCapture;
use crate::config::submit_path;
use crate::profile::ProfileSubmission;
use crate::store::{StoreError, SubmitEndpoint, SubmitError};

/// Accessors for one text field of the submission.
#[derive(Clone, Copy)]
struct FormField {
	read: fn(&ProfileSubmission) -> &str,
	write: fn(&mut ProfileSubmission) -> &mut String,
}

const NAME: FormField = FormField {
	read: |f| f.name.as_str(),
	write: |f| &mut f.name,
};
const MAJOR: FormField = FormField {
	read: |f| f.major.as_str(),
	write: |f| &mut f.major,
};
const GRAD_YEAR: FormField = FormField {
	read: |f| f.grad_year.as_str(),
	write: |f| &mut f.grad_year,
};
const BUILDING: FormField = FormField {
	read: |f| f.building.as_str(),
	write: |f| &mut f.building,
};
const WEBSITE: FormField = FormField {
	read: |f| f.website.as_str(),
	write: |f| &mut f.website,
};
const PHOTO_URL: FormField = FormField {
	read: |f| f.photo_url.as_str(),
	write: |f| &mut f.photo_url,
};
const GITHUB: FormField = FormField {
	read: |f| f.github.as_str(),
	write: |f| &mut f.github,
};
const LINKEDIN: FormField = FormField {
	read: |f| f.linkedin.as_str(),
	write: |f| &mut f.linkedin,
};
const TWITTER: FormField = FormField {
	read: |f| f.twitter.as_str(),
	write: |f| &mut f.twitter,
};

#[component]
fn Field(
	label: &'static str,
	#[prop(optional)] hint: Option<&'static str>,
	children: Children,
) -> impl IntoView {
	view! {
		<div class="field">
			<label class="field-label">{label}</label>
			{children()}
			{hint.map(|h| view! { <p class="form-hint">{h}</p> })}
		</div>
	}
}

#[component]
fn TextInput(
	form: RwSignal<ProfileSubmission>,
	field: FormField,
	#[prop(optional)] placeholder: &'static str,
	#[prop(optional)] required: bool,
	#[prop(default = "text")] kind: &'static str,
) -> impl IntoView {
	view! {
		<input
			type=kind
			class="input"
			required=required
			placeholder=placeholder
			prop:value=move || form.with(|f| (field.read)(f).to_string())
			on:input=move |ev| {
				let value = event_target_value(&ev);
				form.update(|f| *(field.write)(f) = value);
			}
		/>
	}
}

/// The submit endpoint on this page's origin.
fn submit_endpoint() -> Option<SubmitEndpoint> {
	let origin = web_sys::window()?.location().origin().ok()?;
	SubmitEndpoint::new(&origin, submit_path())
		.inspect_err(|err| log::warn!("submit endpoint unavailable: {err}"))
		.ok()
}

/// Submission form. At most one request is in flight; a failed request keeps
/// everything typed so it can be sent again.
#[component]
pub fn Join() -> impl IntoView {
	let form = RwSignal::new(ProfileSubmission::default());
	let invalid = RwSignal::new(None::<String>);
	let photo_help = RwSignal::new(false);
	let endpoint = submit_endpoint();

	let submit = Action::new_local(move |submission: &ProfileSubmission| {
		let (submission, endpoint) = (submission.clone(), endpoint.clone());
		async move {
			let result = match endpoint {
				Some(endpoint) => endpoint.submit(&submission).await,
				None => Err(SubmitError::Store(StoreError::NotConfigured)),
			};
			result.map_err(|err| {
				log::warn!("submission failed: {err}");
				err.user_message()
			})
		}
	});
	let pending = submit.pending();
	let done = move || submit.value().with(|v| matches!(v, Some(Ok(()))));
	let error = move || {
		invalid.get().or_else(|| {
			submit
				.value()
				.with(|v| v.as_ref().and_then(|r| r.as_ref().err().cloned()))
		})
	};

	let on_submit = move |ev: leptos::ev::SubmitEvent| {
		ev.prevent_default();
		if pending.get_untracked() {
			return;
		}
		let submission = form.get_untracked();
		if let Err(err) = submission.validate() {
			invalid.set(Some(err.to_string()));
			return;
		}
		invalid.set(None);
		submit.dispatch(submission);
	};

	let on_capture = Callback::new(move |url: String| form.update(|f| f.photo_url = url));
	let captured_photo = move || {
		form.with(|f| f.photo_url.starts_with("data:").then(|| f.photo_url.clone()))
	};

	view! {
		<Show
			when=move || !done()
			fallback=|| {
				view! {
					<main class="page centered">
						<p class="eyebrow">"// success"</p>
						<p class="hero-title">"you're on the list."</p>
						<p class="muted">{format!("your profile is live on {BRAND}.")}</p>
						<A href="/" attr:class="accent-link">
							"← back to directory"
						</A>
					</main>
				}
			}
		>
			<main class="page narrow">
				<A href="/" attr:class="muted-link">
					{format!("← {BRAND}")}
				</A>
				<p class="eyebrow">"// join the network"</p>
				<h1 class="form-title">"add your profile"</h1>

				<form class="join-form" on:submit=on_submit>
					<div class="form-section">
						<p class="form-section-title">"required"</p>
						<Field label="full name">
							<TextInput form=form field=NAME placeholder="jane smith" required=true />
						</Field>
						<Field label="major / program">
							<TextInput
								form=form
								field=MAJOR
								placeholder="computer science, b.s."
								required=true
							/>
						</Field>
						<Field label="class year" hint="e.g. 2027, or grad student / ph.d. candidate">
							<TextInput form=form field=GRAD_YEAR placeholder="2027" required=true />
						</Field>
						<Field label="what are you building?">
							<textarea
								class="input"
								rows="3"
								required=true
								placeholder="a short blurb: your project, startup, research, or what you're working on."
								prop:value=move || form.with(|f| (BUILDING.read)(f).to_string())
								on:input=move |ev| {
									let value = event_target_value(&ev);
									form.update(|f| *(BUILDING.write)(f) = value);
								}
							></textarea>
						</Field>
					</div>

					<div class="form-section">
						<p class="form-section-title">"links (optional)"</p>
						<Field label="personal website">
							<TextInput
								form=form
								field=WEBSITE
								placeholder="https://yoursite.com"
								kind="url"
							/>
						</Field>
						<Field label="photo">
							<TextInput form=form field=PHOTO_URL placeholder="https://..." kind="text" />
							{move || {
								captured_photo()
									.map(|src| view! { <img class="avatar preview" src=src alt="captured photo" /> })
							}}
							<PhotoCapture on_capture=on_capture />
							<button
								type="button"
								class="link-button muted"
								on:click=move |_| photo_help.update(|v| *v = !*v)
							>
								"how do i get an image url?"
							</button>
							<Show when=move || photo_help.get()>
								<div class="form-hint help">
									<p>
										"linkedin: open your profile, click your photo, right-click the large image, copy image address"
									</p>
									<p>"github: right-click your avatar on github.com/username, copy image address"</p>
									<p>"any photo: upload it to imgur.com, right-click, copy image address"</p>
								</div>
							</Show>
						</Field>
						<div class="field-row">
							<Field label="github">
								<TextInput form=form field=GITHUB placeholder="username" />
							</Field>
							<Field label="linkedin">
								<TextInput form=form field=LINKEDIN placeholder="in/handle" />
							</Field>
							<Field label="twitter">
								<TextInput form=form field=TWITTER placeholder="@handle" />
							</Field>
						</div>
					</div>

					{move || error().map(|msg| view! { <p class="form-error">"error: " {msg}</p> })}

					<button type="submit" class="accent-link" disabled=move || pending.get()>
						{move || if pending.get() { "submitting..." } else { "submit →" }}
					</button>
				</form>
			</main>
		</Show>
	}
}
