// SPDX-License-Identifier: MPL-2.0
//! `iced_feed` is a feed media carousel component built with the Iced GUI
//! framework.
//!
//! It renders a post's mixed image/video media as a horizontally paged
//! carousel and manages the video playback lifecycle around a scrolling
//! feed: multi-source thumbnail resolution, visibility debouncing, and the
//! per-slide state machine that guarantees at most one decoding video per
//! carousel — and none at all for posts the user is not looking at.

#![doc(html_root_url = "https://docs.rs/iced_feed/0.1.0")]

pub mod carousel;
pub mod config;
pub mod error;
pub mod feed;
pub mod media;
pub mod playback;
pub mod thumbnail;
pub mod ui;
