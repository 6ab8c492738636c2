use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use log::{debug, trace};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Sampling period used while a video is playing
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Player state codes as reported by the embedded YouTube player
pub const STATE_UNSTARTED: i64 = -1;
pub const STATE_ENDED: i64 = 0;
pub const STATE_PLAYING: i64 = 1;
pub const STATE_PAUSED: i64 = 2;

/// Playback state derived from a raw player state code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Playing,
    NotPlaying(i64),
}

impl PlayerState {
    pub fn from_code(code: i64) -> Self {
        if code == STATE_PLAYING {
            PlayerState::Playing
        } else {
            PlayerState::NotPlaying(code)
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, PlayerState::Playing)
    }
}

/// Handle delivered by the player once it is ready
pub trait PlayerHandle: Send + Sync {
    /// Current playhead position in seconds, `None` if the player cannot tell
    fn current_time(&self) -> Option<f64>;
}

/// One playhead reading, tagged with the poller that produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub generation: u64,
    pub time: Option<f64>,
}

/// Repeating task that reads a player's clock and forwards each reading.
///
/// Stops when `stop` is called or the poller is dropped.
pub struct Poller {
    generation: u64,
    stop: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl Poller {
    /// Start sampling `handle` every `period`. Must be called inside a tokio runtime.
    ///
    /// The first reading is taken one full period after spawning.
    pub fn spawn(
        handle: Arc<dyn PlayerHandle>,
        period: Duration,
        generation: u64,
        samples: mpsc::UnboundedSender<Sample>,
    ) -> Self {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        debug!("Starting poller {generation} every {period:?}");

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {
                        let time = handle.current_time();
                        trace!("Poller {generation} sampled {time:?}");
                        if samples.send(Sample { generation, time }).is_err() {
                            break;
                        }
                    }
                }
            }
            debug!("Poller {generation} stopped");
        });

        Self {
            generation,
            stop: Some(stop_tx),
            task,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        self.task.abort();
    }
}

#[derive(Debug)]
struct Clock {
    position: f64,
    started: Option<Instant>,
    ended: bool,
}

/// Headless player whose playhead follows the tokio clock while playing
#[derive(Debug)]
pub struct ClockPlayer {
    duration: f64,
    clock: Mutex<Clock>,
}

impl ClockPlayer {
    pub fn new(duration: f64) -> Self {
        Self {
            duration: duration.max(0.0),
            clock: Mutex::new(Clock {
                position: 0.0,
                started: None,
                ended: false,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Clock> {
        self.clock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn position_of(&self, clock: &Clock) -> f64 {
        let elapsed = clock.started.map(|s| s.elapsed().as_secs_f64()).unwrap_or(0.0);
        (clock.position + elapsed).min(self.duration)
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn play(&self) -> i64 {
        let mut clock = self.lock();
        if clock.started.is_none() && self.position_of(&clock) < self.duration {
            clock.started = Some(Instant::now());
            clock.ended = false;
        }
        drop(clock);
        self.state_code()
    }

    pub fn pause(&self) -> i64 {
        let mut clock = self.lock();
        clock.position = self.position_of(&clock);
        if clock.started.take().is_some() {
            debug!("Paused at {:.3}s", clock.position);
        }
        drop(clock);
        self.state_code()
    }

    pub fn seek(&self, seconds: f64) -> i64 {
        let mut clock = self.lock();
        clock.position = seconds.clamp(0.0, self.duration);
        clock.ended = false;
        if clock.started.is_some() {
            clock.started = Some(Instant::now());
        }
        drop(clock);
        self.state_code()
    }

    /// Current state as a player state code
    pub fn state_code(&self) -> i64 {
        let mut clock = self.lock();
        let position = self.position_of(&clock);
        if clock.started.is_some() && position >= self.duration {
            clock.position = position;
            clock.started = None;
            clock.ended = true;
        }
        if clock.ended {
            STATE_ENDED
        } else if clock.started.is_some() {
            STATE_PLAYING
        } else if clock.position > 0.0 {
            STATE_PAUSED
        } else {
            STATE_UNSTARTED
        }
    }
}

impl PlayerHandle for ClockPlayer {
    fn current_time(&self) -> Option<f64> {
        let clock = self.lock();
        Some(self.position_of(&clock))
    }
}
