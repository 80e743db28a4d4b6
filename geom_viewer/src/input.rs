//! Input handling.
//!
//! A host window would sample the keyboard once per frame. The viewer only
//! cares about keys that were newly pressed this frame, so the state keeps
//! the current and the previous snapshot.

bitflags::bitflags! {
    /// Keys held during one frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Keys: u32 {
        const ESCAPE = 1 << 0;
    }
}

/// Current and previous keyboard snapshots.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyboardState {
    current: Keys,
    previous: Keys,
}

impl KeyboardState {
    /// Rolls the current snapshot into `previous` and stores `snapshot`.
    pub fn advance(&mut self, snapshot: Keys) {
        self.previous = self.current;
        self.current = snapshot;
    }

    /// Pressed this frame but not the frame before.
    pub fn triggered(&self, key: Keys) -> bool {
        self.current.contains(key) && !self.previous.contains(key)
    }
}
