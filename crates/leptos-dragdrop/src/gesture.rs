//! Press-and-hold recognizer
//!
//! `Idle -> Pressed -> (Idle | Dragging)`. A press only becomes a drag once the hold
//! delay has elapsed without the pointer travelling further than the cancel distance.
//! Release before that is a tap; early movement is a scroll. Neither is an error.

/// Hold time before a press turns into a drag.
pub const HOLD_DELAY_MS: u32 = 250;

/// Vertical travel during the hold that cancels the press.
pub const CANCEL_DISTANCE_PX: f64 = 6.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoldDragConfig {
    pub hold_delay_ms: u32,
    pub cancel_distance_px: f64,
}

impl Default for HoldDragConfig {
    fn default() -> Self {
        Self {
            hold_delay_ms: HOLD_DELAY_MS,
            cancel_distance_px: CANCEL_DISTANCE_PX,
        }
    }
}

/// Identifies one press, so a hold timer that outlived its press can be recognized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PressToken(u64);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GesturePhase<K> {
    Idle,
    Pressed { key: K, origin_y: f64, token: PressToken },
    Dragging { key: K },
}

/// What a pointer move meant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MoveOutcome<K> {
    /// No gesture, or still inside the hold window under the threshold.
    Ignored,
    /// Travelled too far during the hold: the press is dropped.
    Cancelled { key: K },
    /// A drag is in progress; the session should follow the pointer.
    Dragging { key: K },
}

/// What a pointer release meant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReleaseOutcome<K> {
    Ignored,
    /// Released during the hold window.
    Tap { key: K },
    /// Released while dragging: commit.
    Dropped { key: K },
}

#[derive(Debug)]
pub struct GestureRecognizer<K> {
    phase: GesturePhase<K>,
    config: HoldDragConfig,
    next_token: u64,
}

impl<K: Copy + PartialEq> GestureRecognizer<K> {
    pub fn new(config: HoldDragConfig) -> Self {
        Self {
            phase: GesturePhase::Idle,
            config,
            next_token: 0,
        }
    }

    pub fn config(&self) -> HoldDragConfig {
        self.config
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, GesturePhase::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, GesturePhase::Dragging { .. })
    }

    /// The handle owning the current gesture, if any.
    pub fn active_key(&self) -> Option<K> {
        match self.phase {
            GesturePhase::Idle => None,
            GesturePhase::Pressed { key, .. } | GesturePhase::Dragging { key } => Some(key),
        }
    }

    /// Pointer down on a handle. Returns the token the hold timer must report back,
    /// or `None` if another gesture is already running.
    pub fn press(&mut self, key: K, y: f64) -> Option<PressToken> {
        if !self.is_idle() {
            return None;
        }
        self.next_token += 1;
        let token = PressToken(self.next_token);
        self.phase = GesturePhase::Pressed { key, origin_y: y, token };
        Some(token)
    }

    pub fn pointer_moved(&mut self, y: f64) -> MoveOutcome<K> {
        match self.phase {
            GesturePhase::Pressed { key, origin_y, .. } => {
                if (y - origin_y).abs() > self.config.cancel_distance_px {
                    self.phase = GesturePhase::Idle;
                    MoveOutcome::Cancelled { key }
                } else {
                    MoveOutcome::Ignored
                }
            }
            GesturePhase::Dragging { key } => MoveOutcome::Dragging { key },
            GesturePhase::Idle => MoveOutcome::Ignored,
        }
    }

    /// The hold timer fired. Promotes the press to a drag only if `token` is still current.
    pub fn hold_elapsed(&mut self, token: PressToken) -> Option<K> {
        match self.phase {
            GesturePhase::Pressed { key, token: current, .. } if current == token => {
                self.phase = GesturePhase::Dragging { key };
                Some(key)
            }
            _ => None,
        }
    }

    pub fn release(&mut self) -> ReleaseOutcome<K> {
        let outcome = match self.phase {
            GesturePhase::Idle => ReleaseOutcome::Ignored,
            GesturePhase::Pressed { key, .. } => ReleaseOutcome::Tap { key },
            GesturePhase::Dragging { key } => ReleaseOutcome::Dropped { key },
        };
        self.phase = GesturePhase::Idle;
        outcome
    }

    /// Abandon the gesture if `key` owns it (its handle left the view). No commit.
    pub fn abandon(&mut self, key: K) -> bool {
        if self.active_key() == Some(key) {
            self.phase = GesturePhase::Idle;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.phase = GesturePhase::Idle;
    }
}
