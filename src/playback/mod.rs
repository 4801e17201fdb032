// SPDX-License-Identifier: MPL-2.0
//! Video playback lifecycle: the per-slide state machine and the
//! command/event protocol it speaks with the host's video backend.

pub mod port;
pub mod session;

pub use port::{command_channel, DecoderCommand, DecoderCommandSender, DecoderEvent};
pub use session::{PlaybackPhase, PlaybackSession};
