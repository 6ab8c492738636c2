use std::future::Future;
use std::sync::Arc;

use eyre::{Result, bail};
use log::debug;
use tokio::sync::mpsc;

use crate::player::{ClockPlayer, STATE_PLAYING, Sample};
use crate::session::Session;

/// How a headless playback run finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEnd {
    /// The player could not start, e.g. zero length
    NotStarted,
    Ended,
    Interrupted,
}

/// Accept a playback length only if it is a positive, finite number of seconds
pub fn validate_duration(seconds: f64) -> Result<f64> {
    if !seconds.is_finite() || seconds <= 0.0 {
        bail!("playback duration must be a positive number of seconds, got {seconds}");
    }
    Ok(seconds)
}

/// Play `player` as the session's video, calling `on_caption` with the playhead and caption
/// every time the caption changes.
///
/// Returns when the player reaches its end, when `interrupt` completes, or right away if the
/// player does not start. Samples queued before the call are discarded.
pub async fn play<I, F>(
    session: &mut Session,
    samples: &mut mpsc::UnboundedReceiver<Sample>,
    player: Arc<ClockPlayer>,
    interrupt: I,
    mut on_caption: F,
) -> PlaybackEnd
where
    I: Future<Output = ()>,
    F: FnMut(f64, Option<&str>),
{
    while samples.try_recv().is_ok() {}

    session.on_ready(player.clone());
    session.on_state_change(player.play());
    if !session.is_polling() {
        debug!("Player did not start ({:.1}s long)", player.duration());
        session.on_state_change(player.state_code());
        return PlaybackEnd::NotStarted;
    }
    debug!("Playing {:.1}s", player.duration());

    tokio::pin!(interrupt);
    let mut shown: Option<String> = None;
    let end = loop {
        tokio::select! {
            _ = &mut interrupt => {
                session.on_state_change(player.pause());
                break PlaybackEnd::Interrupted;
            }
            sample = samples.recv() => {
                let Some(sample) = sample else { break PlaybackEnd::Ended };
                if !session.on_tick(sample) {
                    continue;
                }

                let caption = session.current_caption().map(str::to_string);
                if caption != shown {
                    on_caption(session.current_time().unwrap_or_default(), caption.as_deref());
                    shown = caption;
                }

                let code = player.state_code();
                if code != STATE_PLAYING {
                    session.on_state_change(code);
                    break PlaybackEnd::Ended;
                }
            }
        }
    };

    debug!("Playback finished: {end:?}");
    end
}
