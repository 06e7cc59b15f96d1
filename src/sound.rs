//! Fire-and-forget sound cues.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use strum::Display;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SoundKind
{
    Click,
    Success,
    Error,
}

/// Output device for sound cues.
///
/// A call starts the cue from the beginning; nothing is queued. Failures are
/// reported back so the caller can log and drop them.
pub trait SoundBackend
{
    fn play(&self, kind: SoundKind) -> io::Result<()>;
}

/// Rings the terminal bell.
pub struct Bell;

impl SoundBackend for Bell
{
    fn play(&self, _kind: SoundKind) -> io::Result<()>
    {
        let mut stdout = io::stdout();
        stdout.write_all(b"\x07")?;
        stdout.flush()
    }
}

/// Records every cue it receives. Clones share the same log.
#[derive(Clone, Default)]
pub struct Recorder
{
    played: Rc<RefCell<Vec<SoundKind>>>,
}

impl Recorder
{
    pub fn new() -> Self
    {
        Self::default()
    }

    pub fn played(&self) -> Vec<SoundKind>
    {
        self.played.borrow().clone()
    }

    pub fn count(&self, kind: SoundKind) -> usize
    {
        self.played.borrow().iter().filter(|k| **k == kind).count()
    }

    pub fn clear(&self)
    {
        self.played.borrow_mut().clear();
    }
}

impl SoundBackend for Recorder
{
    fn play(&self, kind: SoundKind) -> io::Result<()>
    {
        self.played.borrow_mut().push(kind);
        Ok(())
    }
}

/// Plays a cue if sound is enabled, swallowing output failures.
pub(crate) fn trigger(backend: &dyn SoundBackend, sound_on: bool, kind: SoundKind)
{
    if !sound_on {
        return;
    }
    trace!(%kind, "Sound cue");
    if let Err(err) = backend.play(kind) {
        debug!(%kind, error = %err, "Sound cue dropped");
    }
}
