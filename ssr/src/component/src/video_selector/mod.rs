#[cfg(feature = "hydrate")]
mod capture;
pub mod sampler;

use consts::thumbnail::FILE_NAME;
use leptos::{html::Input, prelude::*};
use leptos_icons::*;
use thiserror::Error;
use utils::{
    data_url::{self, DataUrl},
    web::FileWithUrl,
};
use web_sys::File;

use crate::buttons::SecondaryButton;
use sampler::ThumbnailCandidates;

#[derive(Debug, Error)]
pub enum ThumbnailError {
    #[error(transparent)]
    DataUrl(#[from] data_url::DataUrlError),
    #[error("could not create thumbnail file: {0}")]
    Js(String),
}

/// Turns a sampled frame into the image file that gets uploaded
pub fn thumbnail_file(frame: &DataUrl) -> Result<File, ThumbnailError> {
    let bytes = js_sys::Uint8Array::from(frame.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let opts = web_sys::FilePropertyBag::new();
    opts.set_type(&frame.mime_type);

    File::new_with_u8_array_sequence_and_options(&parts, FILE_NAME, &opts)
        .map_err(|e| ThumbnailError::Js(format!("{e:?}")))
}

#[component]
fn CandidateGrid(
    candidates: RwSignal<ThumbnailCandidates, LocalStorage>,
    on_select: impl Fn(usize) + Copy + Send + Sync + 'static,
) -> impl IntoView {
    view! {
        <div class="grid grid-cols-3 gap-2 w-full">
            {move || {
                candidates
                    .with(|c| c.urls().to_vec())
                    .into_iter()
                    .enumerate()
                    .map(|(idx, url)| {
                        let border = move || {
                            if candidates.with(|c| c.is_selected(idx)) {
                                "border-pink-500"
                            } else {
                                "border-transparent"
                            }
                        };
                        view! {
                            <button
                                class=move || format!("overflow-hidden rounded-lg border-4 {}", border())
                                on:click=move |_| on_select(idx)
                            >
                                <img class="object-cover w-full aspect-video" src=url alt="Thumbnail candidate" />
                            </button>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}

/// Video picker that previews the chosen file and lets the user pick a thumbnail
///
/// The chosen file lands in `video_file`. Frames are sampled from it in the
/// browser; the picked frame is handed over as a JPEG in `thumb_file`.
#[component]
pub fn VideoSelector(
    video_file: RwSignal<Option<FileWithUrl>, LocalStorage>,
    thumb_file: RwSignal<Option<File>, LocalStorage>,
) -> impl IntoView {
    let file_ref = NodeRef::<Input>::new();
    let candidates = RwSignal::new_local(ThumbnailCandidates::default());

    let select = move |idx: usize| {
        let mut picked = None;
        candidates.update(|c| picked = c.select_frame(idx));
        let Some(frame) = picked else {
            return;
        };
        match frame
            .map_err(ThumbnailError::from)
            .and_then(|frame| thumbnail_file(&frame))
        {
            Ok(file) => thumb_file.set(Some(file)),
            Err(e) => log::error!("failed to convert thumbnail: {e}"),
        }
    };

    #[cfg(feature = "hydrate")]
    {
        use capture::FrameSampler;
        use leptos::ev::change;
        use leptos_use::use_event_listener;
        use sampler::GenerationCounter;
        use wasm_bindgen::JsCast;
        use web_sys::HtmlInputElement;

        let generation = StoredValue::new_local(GenerationCounter::default());
        let active = StoredValue::new_local(None::<FrameSampler>);

        _ = use_event_listener(file_ref, change, move |ev| {
            let Some(file) = ev.target().and_then(|target| {
                let input: &HtmlInputElement = target.dyn_ref()?;
                input.files()?.get(0)
            }) else {
                return;
            };
            let file = FileWithUrl::new(file);
            let src = file.url.to_string();
            log::debug!("video selected: {}", file.file.name());

            thumb_file.set(None);
            candidates.set(ThumbnailCandidates::default());
            video_file.set(Some(file));

            let generation = generation.get_value();
            let current = generation.bump();
            let on_frame = move |url: String| {
                let mut first = false;
                candidates.update(|c| first = c.push(url));
                if first {
                    select(0);
                }
            };
            // replacing the previous sampler detaches its handlers
            active.set_value(None);
            match FrameSampler::start(&src, current, generation, on_frame) {
                Ok(sampler) => active.set_value(Some(sampler)),
                Err(e) => log::error!("failed to start frame sampling: {e:?}"),
            }
        });
    }

    let has_video = move || video_file.with(Option::is_some);
    let open_picker = move || {
        if let Some(input) = file_ref.get_untracked() {
            input.click();
        }
    };

    view! {
        <div class="flex flex-col gap-4 items-center w-full">
            <input
                node_ref=file_ref
                type="file"
                accept="video/*"
                class="hidden w-0 h-0"
            />
            <Show
                when=has_video
                fallback=move || {
                    view! {
                        <div class="flex flex-col gap-4 justify-center items-center w-full rounded-2xl border-2 border-dashed border-neutral-600 bg-neutral-950 aspect-video">
                            <Icon attr:class="w-10 h-10 text-gray-400" icon=icondata::BiCloudUploadRegular />
                            <span class="text-[16px] font-semibold text-white">
                                Upload a video to share with the world!
                            </span>
                            <SecondaryButton on_click=open_picker>"Select file"</SecondaryButton>
                        </div>
                    }
                }
            >
                <video
                    class="object-contain p-2 w-full bg-black rounded-xl aspect-video"
                    controls
                    playsinline
                    src=move || video_file.with(|f| f.as_ref().map(|f| f.url.to_string()))
                ></video>
                <SecondaryButton on_click=open_picker>"Choose another video"</SecondaryButton>
            </Show>
            <Show when=move || candidates.with(|c| !c.is_empty())>
                <div class="flex flex-col gap-2 w-full">
                    <span class="font-light text-[18px] text-neutral-300">Thumbnail</span>
                    <CandidateGrid candidates on_select=select />
                </div>
            </Show>
        </div>
    }
}
