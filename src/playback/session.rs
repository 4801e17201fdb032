// SPDX-License-Identifier: MPL-2.0
//! Playback state machine for one video slide.
//!
//! Manages the lifecycle of feed video playback with clear state transitions:
//! - Thumbnail: Resting state, showing the resolved still and a play affordance
//! - ResolvingThumbnail: Preview resolution in flight
//! - Loading: Decoder requested, first frame not yet ready
//! - Ready: First frame shown, start command issued, confirmation pending
//! - Playing: Frames advancing
//! - Paused: Decoder resources held, advancement stopped
//! - Error: Decode or network failure, fixed error affordance, no retry
//!
//! The machine is a closed enumeration with a single set of transition
//! methods: combinations like "errored and playing" are unrepresentable.
//! Whether the slide may hold a decoder at all is decided outside, by the
//! activation predicate; the session only consumes its verdict.

use crate::playback::port::{DecoderCommand, DecoderCommandSender, DecoderEvent};
use crate::thumbnail::Resolution;
use std::time::Duration;

/// Playback phase of a video slide.
///
/// This enum represents all possible states of a slide's playback,
/// ensuring type-safe state transitions via pattern matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackPhase {
    /// Resting state: resolved still image plus a play affordance.
    /// No decoder resources held.
    Thumbnail,

    /// Thumbnail resolution is in flight; shows a progress indicator.
    ResolvingThumbnail,

    /// Decoder requested, first frame not yet ready.
    Loading,

    /// First frame available, start command issued, waiting for the
    /// backend's confirmation that frames are advancing.
    Ready,

    /// Frames advancing.
    Playing,

    /// Decoder resources held, advancement stopped by the user.
    Paused,

    /// Decode or network failure. Fixed error affordance, no automatic
    /// retry; remounting the slide is the only way out.
    Error { message: String },
}

impl PlaybackPhase {
    /// Returns true while the slide holds decoder resources.
    #[must_use]
    pub fn holds_decoder(&self) -> bool {
        matches!(
            self,
            Self::Loading | Self::Ready | Self::Playing | Self::Paused
        )
    }

    /// Returns true if frames are advancing.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Returns true if playback is user-paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        matches!(self, Self::Paused)
    }

    /// Returns true if the slide failed terminally.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Returns the error message if in the error state.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { message } => Some(message),
            _ => None,
        }
    }
}

/// Per-slide mutable playback state.
///
/// Created when the slide mounts, dropped when it unmounts. All decoder
/// interaction flows through the attached [`DecoderCommandSender`]; events
/// come back through [`PlaybackSession::handle_decoder_event`] tagged with
/// the load ticket they answer.
#[derive(Debug)]
pub struct PlaybackSession {
    /// URI of the video this slide plays.
    uri: String,

    /// Current playback phase.
    phase: PlaybackPhase,

    /// Audio mute state. Sessions are born muted; the first frame of an
    /// activated load unmutes. Only the centered+active slide ever reaches
    /// that point, so at most one unmuted player exists feed-wide.
    muted: bool,

    /// Last reported playback position.
    position: Duration,

    /// Last reported media duration.
    duration: Duration,

    /// Verdict of the activation predicate, as last applied.
    activated: bool,

    /// Current load ticket. Bumped on every load and on every release, so
    /// events from an abandoned load can be told apart and discarded.
    ticket: u64,

    /// Resolved preview URI, once resolution finishes.
    preview_uri: Option<String>,

    /// Resolution exhausted every source; show the placeholder glyph.
    thumbnail_error: bool,

    /// Command sender to the video backend (attached by the host).
    command_sender: Option<DecoderCommandSender>,
}

impl PlaybackSession {
    /// Creates a session resting on its thumbnail.
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            phase: PlaybackPhase::Thumbnail,
            muted: true,
            position: Duration::ZERO,
            duration: Duration::ZERO,
            activated: false,
            ticket: 0,
            preview_uri: None,
            thumbnail_error: false,
            command_sender: None,
        }
    }

    /// Sets the command sender for controlling the video backend.
    pub fn set_command_sender(&mut self, sender: DecoderCommandSender) {
        self.command_sender = Some(sender);
    }

    /// Returns true if the session has a command sender attached.
    #[must_use]
    pub fn has_command_sender(&self) -> bool {
        self.command_sender.is_some()
    }

    /// Returns the video URI.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Returns the current playback phase.
    #[must_use]
    pub fn phase(&self) -> &PlaybackPhase {
        &self.phase
    }

    /// Returns the audio mute state.
    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Returns the last reported playback position.
    #[must_use]
    pub fn position(&self) -> Duration {
        self.position
    }

    /// Returns the last reported media duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Returns the activation verdict as last applied.
    #[must_use]
    pub fn is_activated(&self) -> bool {
        self.activated
    }

    /// Returns the current load ticket.
    ///
    /// The host uses this to stamp decoder events for this session.
    #[must_use]
    pub fn current_ticket(&self) -> u64 {
        self.ticket
    }

    /// Returns the resolved preview URI, if resolution has finished.
    #[must_use]
    pub fn preview_uri(&self) -> Option<&str> {
        self.preview_uri.as_deref()
    }

    /// Returns true when resolution exhausted every source and the slide
    /// shows the placeholder glyph.
    #[must_use]
    pub fn thumbnail_error(&self) -> bool {
        self.thumbnail_error
    }

    /// Playback progress as a fraction in `[0, 1]`, when the duration is
    /// known.
    #[must_use]
    pub fn progress(&self) -> Option<f32> {
        if self.duration.is_zero() {
            return None;
        }
        #[allow(clippy::cast_possible_truncation)]
        let fraction = (self.position.as_secs_f64() / self.duration.as_secs_f64()) as f32;
        Some(fraction.clamp(0.0, 1.0))
    }

    /// Marks thumbnail resolution as in flight.
    ///
    /// Only meaningful from the resting state with no preview yet; any
    /// other phase keeps its ground.
    pub fn begin_thumbnail_resolution(&mut self) {
        if self.phase == PlaybackPhase::Thumbnail
            && self.preview_uri.is_none()
            && !self.thumbnail_error
        {
            self.phase = PlaybackPhase::ResolvingThumbnail;
        }
    }

    /// Records the outcome of thumbnail resolution.
    ///
    /// The preview is recorded in whatever phase the session is in — the
    /// slide may long since be Loading or Playing — but only a session
    /// still waiting in `ResolvingThumbnail` changes phase.
    pub fn thumbnail_resolved(&mut self, resolution: Resolution) {
        match resolution {
            Resolution::Resolved { uri } => {
                self.preview_uri = Some(uri);
                self.thumbnail_error = false;
            }
            Resolution::Unavailable => {
                self.thumbnail_error = true;
            }
        }
        if self.phase == PlaybackPhase::ResolvingThumbnail {
            self.phase = PlaybackPhase::Thumbnail;
        }
    }

    /// Applies the activation predicate's verdict.
    ///
    /// Turning true auto-starts loading from the resting states — no tap
    /// needed. Turning false while any decoder resource is held performs
    /// the full release ritual immediately; a pending `Loading` is
    /// abandoned, not awaited.
    pub fn set_activation(&mut self, active: bool) {
        if self.activated == active {
            return;
        }
        self.activated = active;

        if active {
            if matches!(
                self.phase,
                PlaybackPhase::Thumbnail | PlaybackPhase::ResolvingThumbnail
            ) {
                self.start_loading();
            }
        } else if self.phase.holds_decoder() {
            self.release();
        }
    }

    /// Handles a tap on the slide surface.
    ///
    /// Taps only carry weight while the activation predicate holds; a tap
    /// on a slide the user is merely flicking past is ignored, keeping the
    /// at-most-one-decoder invariant intact.
    pub fn tap(&mut self) {
        if !self.activated {
            return;
        }
        match self.phase {
            PlaybackPhase::Thumbnail | PlaybackPhase::ResolvingThumbnail => self.start_loading(),
            PlaybackPhase::Ready | PlaybackPhase::Playing => self.pause_playback(),
            PlaybackPhase::Paused => self.resume_playback(),
            PlaybackPhase::Loading | PlaybackPhase::Error { .. } => {}
        }
    }

    /// Handles an event from the video backend.
    ///
    /// Events stamped with a ticket other than the current one answer a
    /// load this session already abandoned; they are discarded so a stale
    /// result can never resurrect a released slide.
    pub fn handle_decoder_event(&mut self, event: DecoderEvent) {
        if event.ticket() != self.ticket || !self.phase.holds_decoder() {
            return;
        }

        match event {
            DecoderEvent::FirstFrame { .. } => {
                if self.phase == PlaybackPhase::Loading {
                    // Auto-start: muted cold start, unmuted the instant the
                    // frame is up. Only the activated slide gets here.
                    self.phase = PlaybackPhase::Ready;
                    self.muted = false;
                    self.send(DecoderCommand::SetMuted(false));
                    self.send(DecoderCommand::Play);
                }
            }
            DecoderEvent::Started { .. } => {
                if self.phase == PlaybackPhase::Ready {
                    self.phase = PlaybackPhase::Playing;
                }
            }
            DecoderEvent::Progress {
                position, duration, ..
            } => {
                self.position = position;
                self.duration = duration;
            }
            DecoderEvent::Finished { .. } => {
                if self.phase == PlaybackPhase::Playing {
                    // Loop: replay from the start, never a terminal state
                    self.position = Duration::ZERO;
                    self.send(DecoderCommand::Restart);
                }
            }
            DecoderEvent::Failed { message, .. } => {
                self.enter_error(message);
            }
        }
    }

    /// Releases decoder resources on unmount.
    ///
    /// Unconditional teardown path: stop and unload are attempted even when
    /// the backend cannot confirm them.
    pub fn shutdown(&mut self) {
        if self.phase.holds_decoder() {
            self.release();
        }
    }

    fn start_loading(&mut self) {
        self.ticket += 1;
        self.position = Duration::ZERO;
        self.phase = PlaybackPhase::Loading;
        self.send(DecoderCommand::Load {
            uri: self.uri.clone(),
            ticket: self.ticket,
        });
    }

    fn pause_playback(&mut self) {
        self.phase = PlaybackPhase::Paused;
        self.send(DecoderCommand::Pause);
    }

    fn resume_playback(&mut self) {
        self.phase = PlaybackPhase::Playing;
        self.send(DecoderCommand::Play);
    }

    /// The full release ritual. Partial cleanup is a defect: stop, unload,
    /// position reset, re-mute and ticket bump happen together, whatever
    /// caused the exit.
    fn release(&mut self) {
        self.send(DecoderCommand::Stop);
        self.send(DecoderCommand::Unload);
        self.position = Duration::ZERO;
        self.muted = true;
        self.ticket += 1;
        self.phase = PlaybackPhase::Thumbnail;
    }

    fn enter_error(&mut self, message: String) {
        self.send(DecoderCommand::Stop);
        self.send(DecoderCommand::Unload);
        self.position = Duration::ZERO;
        self.muted = true;
        self.ticket += 1;
        self.phase = PlaybackPhase::Error { message };
    }

    fn send(&self, command: DecoderCommand) {
        if let Some(sender) = &self.command_sender {
            let _ = sender.send(command);
        }
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        // Unmount is a release point like any other
        if self.phase.holds_decoder() {
            self.send(DecoderCommand::Stop);
            self.send(DecoderCommand::Unload);
        }
    }
}
