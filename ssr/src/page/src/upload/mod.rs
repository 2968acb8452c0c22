mod validators;

use auth::FirebaseAuth;
use component::{
    buttons::{HighlightedButton, SecondaryButton},
    form::{ErrorText, InputField, TextAreaField},
    video_selector::VideoSelector,
};
use consts::{APP_NAME, LOGIN_PATH};
use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::components::Redirect;
use state::session::{session_state, SessionState};
use utils::{
    storage::FirebaseStorage,
    upload::{use_video_upload, UploadRequest, UploadedVideo},
    web::FileWithUrl,
};
use validators::{description_validator, title_validator};
use web_sys::File;

/// Id token for the storage writes, refreshed when possible
async fn fresh_id_token(session: SessionState) -> Option<String> {
    let current = session.session_untracked()?;
    match FirebaseAuth::default().refresh(&current.refresh_token).await {
        Ok(tokens) => {
            let id_token = tokens.id_token.clone();
            session.update_tokens(tokens);
            Some(id_token)
        }
        Err(e) => {
            log::warn!("token refresh failed, using stored token: {e}");
            Some(current.id_token)
        }
    }
}

#[component]
fn UploadSuccess(uploaded: UploadedVideo, on_reset: impl Fn() + 'static) -> impl IntoView {
    view! {
        <div class="flex flex-col gap-4 items-center p-6 w-full rounded-2xl max-w-[627px] bg-neutral-950">
            <h2 class="font-light text-white text-[28px]">Upload complete</h2>
            <p class="text-center text-neutral-300">
                {format!("\"{}\" has been uploaded.", uploaded.title)}
            </p>
            <p class="text-xs break-all text-neutral-500">{uploaded.video_path.to_string()}</p>
            <SecondaryButton on_click=on_reset>"Upload another video"</SecondaryButton>
        </div>
    }
}

#[component]
fn UploadForm() -> impl IntoView {
    let session = session_state();

    let video_file = RwSignal::new_local(None::<FileWithUrl>);
    let thumb_file = RwSignal::new_local(None::<File>);
    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let title_error = RwSignal::new(None::<String>);
    let description_error = RwSignal::new(None::<String>);
    let uploaded = RwSignal::new(None::<UploadedVideo>);

    let helper = use_video_upload(FirebaseStorage::new(
        session.id_token_untracked().unwrap_or_default(),
    ));
    let loading = helper.loading();
    let upload_error = helper.error();

    let upload_action = Action::new_local(move |(title, description): &(String, String)| {
        let helper = helper.clone();
        let title = title.clone();
        let description = description.clone();
        async move {
            let (Some(video), Some(thumbnail)) =
                (video_file.get_untracked(), thumb_file.get_untracked())
            else {
                return;
            };
            let Some(owner_id) = session.session_untracked().map(|s| s.uid) else {
                return;
            };
            let Some(id_token) = fresh_id_token(session).await else {
                return;
            };

            let request = UploadRequest {
                video: video.file,
                thumbnail,
                title,
                description,
                owner_id,
            };
            let res = helper
                .with_storage(FirebaseStorage::new(id_token))
                .upload(request)
                .await;
            if res.is_some() {
                uploaded.set(res);
            }
        }
    });
    let pending = upload_action.pending();

    let on_submit = move || {
        let title_res = title_validator(title.get_untracked());
        let description_res = description_validator(description.get_untracked());
        title_error.set(title_res.as_ref().err().cloned());
        description_error.set(description_res.as_ref().err().cloned());

        if let (Ok(title), Ok(description)) = (title_res, description_res) {
            upload_action.dispatch((title, description));
        }
    };

    let missing_files = Signal::derive(move || {
        video_file.with(Option::is_none) || thumb_file.with(Option::is_none)
    });
    let busy = Signal::derive(move || loading.get() || pending.get());

    let reset = move || {
        uploaded.set(None);
        video_file.set(None);
        thumb_file.set(None);
        title.set(String::new());
        description.set(String::new());
    };

    view! {
        <Show
            when=move || uploaded.with(Option::is_none)
            fallback=move || {
                uploaded.get().map(|uploaded| view! { <UploadSuccess uploaded on_reset=reset /> })
            }
        >
            <div class="flex flex-col gap-4 justify-center items-start w-full lg:flex-row lg:gap-20">
                <div class="flex flex-col w-full max-w-[627px]">
                    <VideoSelector video_file thumb_file />
                </div>
                <div class="flex flex-col gap-4 w-full max-w-[627px]">
                    <h2 class="mb-2 font-light text-white text-[32px]">Upload Video</h2>
                    <ErrorText error=upload_error />
                    <InputField
                        id="title-input"
                        label="Title"
                        value=title
                        error=title_error
                        placeholder="Give your video a title"
                    />
                    <TextAreaField
                        id="description-input"
                        label="Description"
                        value=description
                        error=description_error
                        rows=8
                        placeholder="Tell viewers about your video"
                    />
                    <HighlightedButton on_click=on_submit disabled=missing_files loading=busy>
                        "Upload"
                    </HighlightedButton>
                </div>
            </div>
        </Show>
    }
}

#[component]
pub fn UploadPage() -> impl IntoView {
    let signed_in = session_state().is_signed_in();

    view! {
        <Title text=format!("{APP_NAME} - Upload") />
        <div class="flex flex-col items-center px-5 pt-4 pb-12 text-white bg-black md:px-8 md:pt-6 lg:px-12 min-h-dvh w-dvw">
            <Show
                when=move || signed_in.get()
                fallback=|| view! { <Redirect path=LOGIN_PATH /> }
            >
                <UploadForm />
            </Show>
        </div>
    }
}
