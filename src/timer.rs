//! Per-game timer registry.
//!
//! Each game instance owns one `Timers` keyed by a purpose enum. Scheduling a
//! purpose replaces whatever was armed for it, so there is never more than one
//! pending callback per purpose. Nothing runs on its own: the owner polls
//! [`Timers::pop_due`] with the current time and routes each expiry through its
//! transition function.

use std::fmt::Debug;
use std::time::{Duration, Instant};
use tracing::trace;

const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Repeat
{
    Once,
    Every(Duration),
}

#[derive(Debug, Clone, Copy)]
struct Entry<P>
{
    purpose: P,
    due: Instant,
    repeat: Repeat,
}

#[derive(Debug, Clone)]
pub struct Timers<P>
{
    entries: Vec<Entry<P>>,
}

impl<P> Default for Timers<P>
{
    fn default() -> Self
    {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<P: Copy + Eq + Debug> Timers<P>
{
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Arms a one-shot timer `delay` after `now`.
    pub fn once(&mut self, purpose: P, now: Instant, delay: Duration)
    {
        self.arm(purpose, now + delay, Repeat::Once);
    }

    /// Arms a periodic timer whose first expiry is one `period` after `now`.
    pub fn every(&mut self, purpose: P, now: Instant, period: Duration)
    {
        let period = period.max(MIN_PERIOD);
        self.arm(purpose, now + period, Repeat::Every(period));
    }

    fn arm(&mut self, purpose: P, due: Instant, repeat: Repeat)
    {
        self.cancel(purpose);
        trace!(?purpose, ?repeat, "Timer armed");
        self.entries.push(Entry { purpose, due, repeat });
    }

    /// Disarms `purpose`. Returns whether it was armed.
    pub fn cancel(&mut self, purpose: P) -> bool
    {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.purpose != purpose);
        let removed = before != self.entries.len();
        if removed {
            trace!(?purpose, "Timer cancelled");
        }
        removed
    }

    pub fn cancel_all(&mut self)
    {
        if !self.entries.is_empty() {
            trace!(count = self.entries.len(), "All timers cancelled");
        }
        self.entries.clear();
    }

    pub fn is_armed(&self, purpose: P) -> bool
    {
        self.entries.iter().any(|entry| entry.purpose == purpose)
    }

    pub fn deadline(&self, purpose: P) -> Option<Instant>
    {
        self.entries
            .iter()
            .find(|entry| entry.purpose == purpose)
            .map(|entry| entry.due)
    }

    pub fn len(&self) -> usize
    {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.entries.is_empty()
    }

    /// Takes the earliest expiry at or before `now`.
    ///
    /// One-shot timers are disarmed; periodic ones move to their next period.
    /// Call repeatedly until `None` so that handlers run one at a time and may
    /// cancel or re-arm other purposes in between.
    pub fn pop_due(&mut self, now: Instant) -> Option<P>
    {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= now)
            .min_by_key(|(_, entry)| entry.due)
            .map(|(idx, _)| idx)?;

        let entry = self.entries[idx];
        match entry.repeat {
            Repeat::Once => {
                self.entries.remove(idx);
            }
            Repeat::Every(period) => {
                self.entries[idx].due = entry.due + period;
            }
        }
        trace!(purpose = ?entry.purpose, "Timer fired");
        Some(entry.purpose)
    }
}
