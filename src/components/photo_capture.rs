use leptos::prelude::*;
use leptos::task::spawn_local;
use thiserror::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement, MediaStream,
	MediaStreamConstraints, MediaStreamTrack,
};

/// Side of the square avatar cut from the video frame.
const PHOTO_SIZE: u32 = 192;
const JPEG_QUALITY: f64 = 0.8;

#[derive(Debug, Error)]
pub enum CameraError {
	#[error("camera api unavailable")]
	Unsupported,
	#[error("camera access denied: {0}")]
	Denied(String),
	#[error("capture failed: {0}")]
	Capture(String),
}

impl CameraError {
	pub fn user_message(&self) -> &'static str {
		match self {
			CameraError::Unsupported => "no camera available here. paste a photo url instead.",
			CameraError::Denied(_) => "camera access was blocked. paste a photo url instead.",
			CameraError::Capture(_) => "couldn't take the photo. try again or paste a url.",
		}
	}
}

fn describe(err: JsValue) -> String {
	err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

/// An open camera stream. Dropping it stops every track, which turns the
/// camera off.
pub struct CameraCapture {
	stream: MediaStream,
}

impl CameraCapture {
	/// Asks the browser for a video-only stream.
	pub async fn acquire() -> Result<Self, CameraError> {
		let window = web_sys::window().ok_or(CameraError::Unsupported)?;
		let devices = window
			.navigator()
			.media_devices()
			.map_err(|_| CameraError::Unsupported)?;

		let constraints = MediaStreamConstraints::new();
		constraints.set_video(&JsValue::TRUE);
		constraints.set_audio(&JsValue::FALSE);
		let request = devices
			.get_user_media_with_constraints(&constraints)
			.map_err(|e| CameraError::Denied(describe(e)))?;
		let stream: MediaStream = JsFuture::from(request)
			.await
			.map_err(|e| CameraError::Denied(describe(e)))?
			.dyn_into()
			.map_err(|e| CameraError::Denied(describe(e)))?;

		log::debug!("camera acquired");
		Ok(Self { stream })
	}

	/// Shows the live stream in `video` and waits for playback to start.
	pub async fn attach(&self, video: &HtmlVideoElement) -> Result<(), CameraError> {
		video.set_muted(true);
		video.set_src_object(Some(&self.stream));
		let playing = video.play().map_err(|e| CameraError::Capture(describe(e)))?;
		JsFuture::from(playing)
			.await
			.map_err(|e| CameraError::Capture(describe(e)))?;
		Ok(())
	}

	/// Centre-cropped square JPEG of the current frame, as a `data:` URL.
	pub fn snapshot(&self, video: &HtmlVideoElement) -> Result<String, CameraError> {
		let (vw, vh) = (video.video_width() as f64, video.video_height() as f64);
		if vw == 0.0 || vh == 0.0 {
			return Err(CameraError::Capture("video not ready".into()));
		}
		let side = vw.min(vh);

		let canvas: HtmlCanvasElement = web_sys::window()
			.and_then(|w| w.document())
			.ok_or(CameraError::Unsupported)?
			.create_element("canvas")
			.map_err(|e| CameraError::Capture(describe(e)))?
			.dyn_into()
			.map_err(|e| CameraError::Capture(describe(e.into())))?;
		canvas.set_width(PHOTO_SIZE);
		canvas.set_height(PHOTO_SIZE);
		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.map_err(|e| CameraError::Capture(describe(e)))?
			.ok_or_else(|| CameraError::Capture("no 2d context".into()))?
			.dyn_into()
			.map_err(|e| CameraError::Capture(describe(e.into())))?;

		ctx.draw_image_with_html_video_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
			video,
			(vw - side) / 2.0,
			(vh - side) / 2.0,
			side,
			side,
			0.0,
			0.0,
			PHOTO_SIZE as f64,
			PHOTO_SIZE as f64,
		)
		.map_err(|e| CameraError::Capture(describe(e)))?;

		canvas
			.to_data_url_with_type_and_encoder_options("image/jpeg", &JsValue::from_f64(JPEG_QUALITY))
			.map_err(|e| CameraError::Capture(describe(e)))
	}
}

impl Drop for CameraCapture {
	fn drop(&mut self) {
		let tracks: js_sys::Array = self.stream.get_tracks();
		for track in tracks.iter() {
			if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
				track.stop();
			}
		}
		log::debug!("camera released");
	}
}

/// The video element, or `None` once the component is gone. Async steps finish
/// after unmount, when the node ref is already disposed.
fn mounted_video(video_ref: NodeRef<leptos::html::Video>) -> Option<HtmlVideoElement> {
	video_ref.try_get().flatten()
}

/// Camera button for the join form. Reports the captured photo through
/// `on_capture`; on any camera failure it shows a message and the form's URL
/// field stays the way in.
#[component]
pub fn PhotoCapture(#[prop(into)] on_capture: Callback<String>) -> impl IntoView {
	let video_ref = NodeRef::<leptos::html::Video>::new();
	// held by this component's owner, so unmounting releases the camera too
	let camera = StoredValue::new_local(None::<CameraCapture>);
	let (active, set_active) = signal(false);
	let (error, set_error) = signal(None::<&'static str>);

	let release = move || {
		if let Some(video) = mounted_video(video_ref) {
			video.set_src_object(None);
		}
		camera.set_value(None);
		set_active.set(false);
	};

	let start = move |_| {
		set_error.set(None);
		spawn_local(async move {
			let capture = match CameraCapture::acquire().await {
				Ok(capture) => capture,
				Err(err) => {
					log::warn!("{err}");
					set_error.try_set(Some(err.user_message()));
					return;
				}
			};
			// unmounted while waiting for permission: `capture` drops here
			let Some(video) = mounted_video(video_ref) else {
				return;
			};
			if let Err(err) = capture.attach(&video).await {
				log::warn!("{err}");
				video.set_src_object(None);
				set_error.try_set(Some(err.user_message()));
				return;
			}
			// handed back if the component is already gone, and dropped
			let _ = camera.try_set_value(Some(capture));
			set_active.try_set(true);
		});
	};

	let snap = move |_| {
		let Some(video) = mounted_video(video_ref) else {
			return;
		};
		let shot = camera.with_value(|c| c.as_ref().map(|c| c.snapshot(&video)));
		match shot {
			Some(Ok(url)) => on_capture.run(url),
			Some(Err(err)) => {
				log::warn!("{err}");
				set_error.set(Some(err.user_message()));
			}
			None => {}
		}
		release();
	};

	view! {
		<div class="photo-capture">
			<video node_ref=video_ref class="photo-capture-video" class:hidden=move || !active.get() />
			<Show
				when=move || active.get()
				fallback=move || {
					view! {
						<button type="button" class="link-button" on:click=start>
							"use camera"
						</button>
					}
				}
			>
				<button type="button" class="link-button" on:click=snap>
					"take photo"
				</button>
				<button type="button" class="link-button muted" on:click=move |_| release()>
					"cancel"
				</button>
			</Show>
			{move || error.get().map(|msg| view! { <p class="form-hint error">{msg}</p> })}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn video_lookup_after_unmount_is_none() {
		let owner = Owner::new();
		let video_ref = owner.with(NodeRef::<leptos::html::Video>::new);
		assert!(mounted_video(video_ref).is_none());

		owner.cleanup();
		assert!(mounted_video(video_ref).is_none());
	}

	#[test]
	fn every_camera_error_has_a_fallback_hint() {
		let errors = [
			CameraError::Unsupported,
			CameraError::Denied("NotAllowedError".into()),
			CameraError::Capture("video not ready".into()),
		];
		for err in errors {
			assert!(err.user_message().contains("url"), "{err}");
		}
	}
}
