use std::cell::Cell;
use std::rc::Rc;

use consts::thumbnail::SAMPLE_COUNT;
use utils::data_url::{self, DataUrl, DataUrlError};

/// Where the frame sampler seeks next for a video of a given duration
///
/// Frames are taken at `0, step, 2 * step, ..` while the position is still
/// inside the video, with `step = ceil(duration / SAMPLE_COUNT)` whole seconds.
/// Short videos therefore yield fewer than `SAMPLE_COUNT` frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeekSchedule {
    duration: f64,
    step: f64,
}

impl SeekSchedule {
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            step: (duration / SAMPLE_COUNT).ceil(),
        }
    }

    /// No frame should be drawn at `current_time`
    pub fn is_done(&self, current_time: f64) -> bool {
        // unknown length (NaN) never samples
        self.duration.is_nan() || current_time >= self.duration
    }

    /// Position to seek to after `current_time`, `None` for streams without a known end
    pub fn next(&self, current_time: f64) -> Option<f64> {
        Some(current_time + self.step).filter(|t| t.is_finite())
    }

    /// Every position a frame will be drawn at
    pub fn sample_times(&self) -> Vec<f64> {
        let mut times = Vec::new();
        let mut next = Some(0.0);
        while let Some(t) = next.filter(|t| !self.is_done(*t)) {
            times.push(t);
            next = self.next(t);
        }
        times
    }
}

/// Sampled frames as `data:` urls, plus which one the user picked
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ThumbnailCandidates {
    urls: Vec<String>,
    selected: Option<usize>,
}

impl ThumbnailCandidates {
    /// Appends a frame, returns `true` if it was the first and got auto-selected
    pub fn push(&mut self, url: String) -> bool {
        self.urls.push(url);
        if self.selected.is_none() {
            self.selected = Some(0);
            return true;
        }
        false
    }

    /// Moves the selection, returning the chosen frame
    pub fn select(&mut self, index: usize) -> Option<&str> {
        let url = self.urls.get(index)?;
        self.selected = Some(index);
        Some(url)
    }

    /// Selects a frame and decodes it into the bytes the thumbnail file is built from
    pub fn select_frame(&mut self, index: usize) -> Option<Result<DataUrl, DataUrlError>> {
        self.select(index).map(data_url::decode)
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected == Some(index)
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// Identifies the sampling run started for the latest file
///
/// Callbacks capture the generation they were started with and drop their
/// work once a newer file has bumped the counter.
#[derive(Clone, Default)]
pub struct GenerationCounter(Rc<Cell<u64>>);

impl GenerationCounter {
    pub fn bump(&self) -> u64 {
        let next = self.0.get() + 1;
        self.0.set(next);
        next
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.0.get() == generation
    }
}
