use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::mpsc;

use crate::player::{PlayerHandle, PlayerState, Poller, Sample};
use crate::{Transcript, VideoId, extract_video_id};

/// Shown while no video is loaded
pub const PROMPT: &str = "Enter a YouTube video URL.";

/// State behind one player view: the URL form, the loaded video and the caption line.
///
/// Updated only through the `on_*` entry points. Polling starts on a playing state and
/// stops on any other state, on a new submission, and when the session is dropped.
/// Polling runs as a tokio task, so without a runtime the playhead is never sampled.
pub struct Session {
    transcript: Transcript,
    input: String,
    video_id: Option<VideoId>,
    handle: Option<Arc<dyn PlayerHandle>>,
    playing: bool,
    current_time: Option<f64>,
    poll_interval: Duration,
    poller: Option<Poller>,
    generation: u64,
    samples: mpsc::UnboundedSender<Sample>,
}

impl Session {
    /// Create a session and the receiving end for its playhead samples.
    ///
    /// Feed every received sample back through `on_tick`.
    pub fn new(transcript: Transcript, poll_interval: Duration) -> (Self, mpsc::UnboundedReceiver<Sample>) {
        let (samples, rx) = mpsc::unbounded_channel();
        let session = Self {
            transcript,
            input: String::new(),
            video_id: None,
            handle: None,
            playing: false,
            current_time: None,
            poll_interval,
            poller: None,
            generation: 0,
            samples,
        };
        (session, rx)
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Extract a video ID from the input buffer and clear it.
    ///
    /// The previous video, player handle and playhead are discarded either way.
    pub fn on_submit(&mut self) -> Option<&VideoId> {
        let raw = std::mem::take(&mut self.input);
        info!("Submitted: {raw}");

        self.stop_polling();
        self.handle = None;
        self.playing = false;
        self.current_time = None;
        self.video_id = extract_video_id(&raw);

        match &self.video_id {
            Some(id) => debug!("Loaded video {id}"),
            None => debug!("No video ID in submission"),
        }
        self.video_id.as_ref()
    }

    pub fn on_ready(&mut self, handle: Arc<dyn PlayerHandle>) {
        debug!("Player ready");
        self.stop_polling();
        self.handle = Some(handle);
        if self.playing {
            self.start_polling();
        }
    }

    pub fn on_state_change(&mut self, code: i64) {
        let state = PlayerState::from_code(code);
        debug!("Player state changed: {state:?}");
        self.playing = state.is_playing();
        if self.playing {
            self.start_polling();
        } else {
            self.stop_polling();
        }
    }

    /// Apply a playhead sample. Samples from a stopped poller are ignored.
    ///
    /// Returns whether the sample was applied.
    pub fn on_tick(&mut self, sample: Sample) -> bool {
        match &self.poller {
            Some(poller) if poller.generation() == sample.generation => {
                self.current_time = sample.time;
                true
            }
            _ => {
                debug!("Dropping stale sample from poller {}", sample.generation);
                false
            }
        }
    }

    pub fn video_id(&self) -> Option<&VideoId> {
        self.video_id.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_some()
    }

    pub fn current_time(&self) -> Option<f64> {
        self.current_time
    }

    pub fn current_caption(&self) -> Option<&str> {
        self.transcript.caption_at(self.current_time)
    }

    /// The prompt to show when no video is loaded
    pub fn prompt(&self) -> Option<&'static str> {
        self.video_id.is_none().then_some(PROMPT)
    }

    fn start_polling(&mut self) {
        if self.poller.is_some() {
            return;
        }
        let Some(handle) = self.handle.clone() else {
            debug!("Playing before player is ready; polling deferred");
            return;
        };
        if tokio::runtime::Handle::try_current().is_err() {
            warn!("No tokio runtime; playhead polling disabled");
            return;
        }
        self.generation += 1;
        self.poller = Some(Poller::spawn(
            handle,
            self.poll_interval,
            self.generation,
            self.samples.clone(),
        ));
    }

    fn stop_polling(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.stop();
        }
    }
}
