use std::cell::Cell;
use std::rc::Rc;

use consts::thumbnail::MIME_TYPE;
use wasm_bindgen::{prelude::Closure, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement, HtmlVideoElement};

use super::sampler::{GenerationCounter, SeekSchedule};

type Handler = Closure<dyn FnMut(Event)>;

/// Off-screen video + canvas pair that walks a video and reports frames
///
/// Seeks are chained from the element's `seeked` event. Dropping the sampler
/// detaches its handlers and unloads the video.
pub struct FrameSampler {
    video: HtmlVideoElement,
    _on_loaded: Handler,
    _on_seeked: Handler,
}

impl FrameSampler {
    pub fn start(
        src: &str,
        generation: u64,
        current: GenerationCounter,
        on_frame: impl Fn(String) + 'static,
    ) -> Result<Self, JsValue> {
        let document = leptos::prelude::document();
        let video: HtmlVideoElement = document.create_element("video")?.unchecked_into();
        let canvas: HtmlCanvasElement = document.create_element("canvas")?.unchecked_into();
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;

        let schedule = Rc::new(Cell::new(None::<SeekSchedule>));

        let on_loaded = {
            let video = video.clone();
            let canvas = canvas.clone();
            let schedule = schedule.clone();
            let current = current.clone();
            Closure::wrap(Box::new(move |_: Event| {
                if !current.is_current(generation) {
                    return;
                }
                canvas.set_width(video.video_width());
                canvas.set_height(video.video_height());

                let sched = SeekSchedule::new(video.duration());
                schedule.set(Some(sched));
                if sched.is_done(0.0) {
                    log::debug!("video has no frames to sample");
                    return;
                }
                video.set_current_time(0.0);
            }) as Box<dyn FnMut(Event)>)
        };

        let on_seeked = {
            let video = video.clone();
            Closure::wrap(Box::new(move |_: Event| {
                if !current.is_current(generation) {
                    return;
                }
                let Some(sched) = schedule.get() else {
                    return;
                };
                let time = video.current_time();
                if sched.is_done(time) {
                    return;
                }

                let frame = ctx
                    .draw_image_with_html_video_element(&video, 0.0, 0.0)
                    .and_then(|_| canvas.to_data_url_with_type(MIME_TYPE));
                match frame {
                    Ok(url) => on_frame(url),
                    Err(e) => {
                        log::error!("failed to capture frame at {time}s: {e:?}");
                        return;
                    }
                }

                if let Some(next) = sched.next(time) {
                    video.set_current_time(next);
                }
            }) as Box<dyn FnMut(Event)>)
        };

        video.set_onloadeddata(Some(on_loaded.as_ref().unchecked_ref()));
        video.set_onseeked(Some(on_seeked.as_ref().unchecked_ref()));
        video.set_muted(true);
        video.set_preload("auto");
        video.set_src(src);

        Ok(Self {
            video,
            _on_loaded: on_loaded,
            _on_seeked: on_seeked,
        })
    }
}

impl Drop for FrameSampler {
    fn drop(&mut self) {
        self.video.set_onloadeddata(None);
        self.video.set_onseeked(None);
        _ = self.video.remove_attribute("src");
        self.video.load();
    }
}
