// Ownership of the live camera capture across page lifecycle events.
//
// Opening the camera is asynchronous, so the page can be hidden (or a new
// attempt started) before an earlier attempt resolves. Each `open` starts a
// numbered attempt; a handle delivered for a stale attempt, or after
// `close`, is handed straight back to the caller to be released.

pub struct CaptureSlot<T> {
    active: Option<T>,
    attempt: u64,
    closed: bool,
}

impl<T> Default for CaptureSlot<T> {
    fn default() -> Self {
        Self {
            active: None,
            attempt: 0,
            closed: true,
        }
    }
}

impl<T> CaptureSlot<T> {
    /// Start a new attempt; any attempt still in flight becomes stale.
    pub fn open(&mut self) -> u64 {
        self.closed = false;
        self.attempt += 1;
        self.attempt
    }

    /// Store the handle produced by `attempt`. Returns whatever must be
    /// released now: the handle itself if it arrived late, otherwise a
    /// previously held handle it replaces.
    pub fn fulfil(&mut self, attempt: u64, handle: T) -> Option<T> {
        if self.closed || attempt != self.attempt {
            return Some(handle);
        }
        self.active.replace(handle)
    }

    /// Close the slot and give up the live handle, if any.
    pub fn close(&mut self) -> Option<T> {
        self.closed = true;
        self.active.take()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
