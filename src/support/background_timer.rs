/// A periodic interrupt owned by someone else (scheduler tick, uptime
/// counter...) that must be quiet while a gate is open.
pub trait BackgroundTimer {
    type State: Copy;

    /// stop interrupting, return what `restore` needs
    fn suspend(&self) -> Self::State;

    fn restore(&self, state: Self::State);
}

/// Nothing to suspend
impl BackgroundTimer for () {
    type State = ();

    fn suspend(&self) {}

    fn restore(&self, _state: ()) {}
}

/// Suspends a [`BackgroundTimer`] for its own lifetime
pub struct SuspendGuard<'a, B: BackgroundTimer> {
    timer: &'a B,
    saved: B::State,
}

impl<'a, B: BackgroundTimer> SuspendGuard<'a, B> {
    pub fn new(timer: &'a B) -> Self {
        let saved = timer.suspend();
        Self { timer, saved }
    }
}

impl<'a, B: BackgroundTimer> Drop for SuspendGuard<'a, B> {
    fn drop(&mut self) {
        self.timer.restore(self.saved);
    }
}
