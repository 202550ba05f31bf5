use draft_core::TIMER_DECAY_PER_PICKS;

/// Per-pick countdown: `maxTimer` seconds, minus one fifteenth of
/// `maxTimer` for every pick already made within the current pack —
/// later picks in a pack go faster since there's less to read. Floors
/// at zero rather than going negative.
pub fn seconds_for_pick(max_timer: u32, pick_number: u32) -> u32 {
    if max_timer == 0 {
        return 0;
    }
    let decay = (max_timer / TIMER_DECAY_PER_PICKS) * pick_number;
    max_timer.saturating_sub(decay)
}

/// Countdown state the session actor ticks once a second. Reset on
/// every `nextBooster`, paused on disconnect, resumed on reconnect.
#[derive(Debug, Clone, Copy, Default)]
pub struct PickTimer {
    pub remaining: u32,
    pub paused: bool,
}

impl PickTimer {
    pub fn start(max_timer: u32, pick_number: u32) -> Option<Self> {
        if max_timer == 0 {
            return None;
        }
        Some(Self {
            remaining: seconds_for_pick(max_timer, pick_number),
            paused: false,
        })
    }

    /// Advances the clock by one second; returns `false` once expired
    /// or while paused (callers stop ticking on `false`).
    pub fn tick(&mut self) -> bool {
        if self.paused || self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }
}
