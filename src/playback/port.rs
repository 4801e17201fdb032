// SPDX-License-Identifier: MPL-2.0
//! Command/event protocol between a playback session and the host's video
//! backend.
//!
//! The session never touches a decoder directly: it emits [`DecoderCommand`]s
//! through a [`DecoderCommandSender`] and consumes [`DecoderEvent`]s routed
//! back by the host. Commands are send-and-forget — a backend that has gone
//! away must not take the UI loop down with it. Every event carries the load
//! ticket it belongs to, so a session can discard results from a load it has
//! already abandoned.

use std::time::Duration;
use tokio::sync::mpsc;

/// Commands sent to the video backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecoderCommand {
    /// Acquire decode resources for this URI and decode up to the first
    /// frame. Playback starts muted until told otherwise.
    Load { uri: String, ticket: u64 },

    /// Start or resume frame advancement.
    Play,

    /// Stop advancing, keep resources.
    Pause,

    /// Set the audio mute state.
    SetMuted(bool),

    /// Seek back to the start and continue playing (loop).
    Restart,

    /// Stop decoding entirely.
    Stop,

    /// Release every decode resource. Must always follow `Stop` on
    /// teardown, even when the backend cannot confirm completion.
    Unload,
}

/// Events sent from the video backend to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecoderEvent {
    /// The first frame of the load identified by `ticket` is ready.
    FirstFrame { ticket: u64 },

    /// Frame advancement actually began.
    Started { ticket: u64 },

    /// Periodic playback progress report.
    Progress {
        ticket: u64,
        position: Duration,
        duration: Duration,
    },

    /// Playback reached the end of the stream.
    Finished { ticket: u64 },

    /// Decoding or network failure; the load is dead.
    Failed { ticket: u64, message: String },
}

impl DecoderEvent {
    /// Returns the load ticket this event belongs to.
    #[must_use]
    pub fn ticket(&self) -> u64 {
        match self {
            DecoderEvent::FirstFrame { ticket }
            | DecoderEvent::Started { ticket }
            | DecoderEvent::Progress { ticket, .. }
            | DecoderEvent::Finished { ticket }
            | DecoderEvent::Failed { ticket, .. } => *ticket,
        }
    }
}

/// Sender half of the command channel, held by a playback session.
#[derive(Debug, Clone)]
pub struct DecoderCommandSender {
    tx: mpsc::UnboundedSender<DecoderCommand>,
}

impl DecoderCommandSender {
    /// Sends a command to the backend.
    pub fn send(&self, command: DecoderCommand) -> Result<(), String> {
        self.tx
            .send(command)
            .map_err(|_| "Video backend not running".to_string())
    }
}

/// Creates a command channel pair: the sender for a session, the receiver
/// for the host's backend (or a test harness).
#[must_use]
pub fn command_channel() -> (DecoderCommandSender, mpsc::UnboundedReceiver<DecoderCommand>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (DecoderCommandSender { tx }, rx)
}
