//! Runs a [`Carousel`] on a tokio task against the real clock.
//!
//! The task is the single event-processing thread for one carousel: commands
//! arrive over an unbounded mpsc channel, timers are honored by sleeping until
//! the engine's next deadline, and every state change is published as a
//! [`Frame`] on a `watch` channel. Dropping the [`CarouselHandle`] aborts the
//! task, so no timer outlives the view it belongs to.

use super::{Carousel, CarouselTiming, Frame, Input};
use crate::types::PhotoEntry;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::debug;

#[derive(Debug)]
enum Command {
    Input(Input),
    SetPhotos(Vec<PhotoEntry>),
    Unmount,
}

/// Cloneable sender for feeding input from other threads.
#[derive(Debug, Clone)]
pub struct InputSender {
    tx: mpsc::UnboundedSender<Command>,
}

impl InputSender {
    /// Returns `false` once the carousel task has ended.
    pub fn send(&self, input: Input) -> bool {
        self.tx.send(Command::Input(input)).is_ok()
    }
}

#[derive(Debug)]
pub struct CarouselHandle {
    tx: mpsc::UnboundedSender<Command>,
    frames: watch::Receiver<Option<Frame>>,
    task: JoinHandle<()>,
}

impl CarouselHandle {
    /// Mount a carousel and start driving it. Must be called inside a tokio
    /// runtime with the time driver enabled.
    pub fn spawn(photos: Vec<PhotoEntry>, timing: CarouselTiming) -> Self {
        let origin = Instant::now();
        let engine = Carousel::new(photos, timing, 0);
        let (frames_tx, frames) = watch::channel(engine.view());
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(engine, rx, frames_tx, origin));
        Self { tx, frames, task }
    }

    pub fn send(&self, input: Input) -> bool {
        self.tx.send(Command::Input(input)).is_ok()
    }

    pub fn sender(&self) -> InputSender {
        InputSender {
            tx: self.tx.clone(),
        }
    }

    pub fn set_photos(&self, photos: Vec<PhotoEntry>) -> bool {
        self.tx.send(Command::SetPhotos(photos)).is_ok()
    }

    /// Latest published frame.
    pub fn frame(&self) -> Option<Frame> {
        *self.frames.borrow()
    }

    /// Subscribe to frame updates.
    pub fn frames(&self) -> watch::Receiver<Option<Frame>> {
        self.frames.clone()
    }

    /// Tear the view down and wait for the task to finish.
    pub async fn unmount(mut self) {
        let _ = self.tx.send(Command::Unmount);
        let _ = (&mut self.task).await;
    }
}

impl Drop for CarouselHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn elapsed_ms(origin: Instant) -> u64 {
    u64::try_from(origin.elapsed().as_millis()).unwrap_or(u64::MAX)
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending().await,
    }
}

async fn run(
    mut engine: Carousel,
    mut rx: mpsc::UnboundedReceiver<Command>,
    frames: watch::Sender<Option<Frame>>,
    origin: Instant,
) {
    loop {
        let deadline = engine
            .next_deadline()
            .map(|ms| origin + Duration::from_millis(ms));
        tokio::select! {
            command = rx.recv() => {
                let now_ms = elapsed_ms(origin);
                engine.advance(now_ms);
                match command {
                    Some(Command::Input(input)) => engine.handle(input, now_ms),
                    Some(Command::SetPhotos(photos)) => engine.set_photos(photos, now_ms),
                    Some(Command::Unmount) | None => break,
                }
            }
            () = sleep_until_deadline(deadline) => {
                engine.advance(elapsed_ms(origin));
            }
        }
        let next = engine.view();
        frames.send_if_modified(|frame| {
            let changed = *frame != next;
            *frame = next;
            changed
        });
    }
    engine.unmount();
    frames.send_replace(None);
    debug!("carousel driver stopped");
}
