// SPDX-License-Identifier: MPL-2.0
//! Visibility tracker sub-component.
//!
//! Converts the hosting feed's raw `is_post_visible` signal into the
//! debounced `is_centered` verdict the playback sessions key off:
//! debounce-on-true, immediate-on-false — asymmetric on purpose. The dwell
//! keeps flick-past posts from starting decodes; the immediate false keeps
//! a pending timer from holding resources after the user has moved on.
//!
//! The tracker owns no timer itself. Arming hands the caller an
//! [`Effect::ArmDwell`] carrying a generation; the caller owns a single
//! abortable timer handle, arming replaces any previous handle, and a
//! cancel effect means *abort the handle*, not just ignore its message. A
//! late [`Message::DwellElapsed`] with a stale generation is discarded —
//! carousels are reused across list items, so a timer from a previous
//! logical post must never center the next one.

/// Visibility tracker state.
#[derive(Debug, Clone, Default)]
pub struct VisibilityTracker {
    /// Raw visibility as last reported by the hosting feed.
    post_visible: bool,
    /// Debounced verdict: the post has been stationary for the dwell.
    centered: bool,
    /// Generation of the dwell timer currently in flight, if any.
    pending: Option<u64>,
    /// Monotonic counter distinguishing timer arms.
    generation: u64,
}

/// Messages for the visibility tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// The hosting feed reported whether the post is visible.
    PostVisibility(bool),
    /// The dwell timer armed with this generation fired.
    DwellElapsed { generation: u64 },
}

/// Effects produced by the visibility tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// No effect.
    None,
    /// Arm a single-shot dwell timer for this generation, replacing any
    /// previously armed timer.
    ArmDwell { generation: u64 },
    /// Abort the outstanding dwell timer; the post left the viewport before
    /// the dwell elapsed.
    CancelDwell,
    /// The post just became centered.
    Centered,
    /// The post just stopped being centered; playback resources must go.
    Uncentered,
}

impl VisibilityTracker {
    /// Creates a tracker for a post that starts out of view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a tracker message.
    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::PostVisibility(true) => {
                if self.post_visible {
                    // Repeated true reports must not re-arm the timer
                    return Effect::None;
                }
                self.post_visible = true;
                self.generation += 1;
                self.pending = Some(self.generation);
                Effect::ArmDwell {
                    generation: self.generation,
                }
            }
            Message::PostVisibility(false) => {
                self.post_visible = false;
                let had_pending = self.pending.take().is_some();
                if self.centered {
                    self.centered = false;
                    Effect::Uncentered
                } else if had_pending {
                    Effect::CancelDwell
                } else {
                    Effect::None
                }
            }
            Message::DwellElapsed { generation } => {
                if self.pending == Some(generation) && self.post_visible {
                    self.pending = None;
                    self.centered = true;
                    Effect::Centered
                } else {
                    // Stale timer from a previous arm; discard
                    Effect::None
                }
            }
        }
    }

    /// Whether the post currently counts as centered.
    #[must_use]
    pub fn is_centered(&self) -> bool {
        self.centered
    }

    /// Raw visibility as last reported.
    #[must_use]
    pub fn is_post_visible(&self) -> bool {
        self.post_visible
    }

    /// Generation of the dwell timer in flight, if one is armed.
    #[must_use]
    pub fn pending_dwell(&self) -> Option<u64> {
        self.pending
    }
}
