// SPDX-License-Identifier: MPL-2.0
//! Slide views: the image path and the video lifecycle chrome.

use crate::feed::{ImageSlide, Message};
use crate::media::ImageData;
use crate::playback::{PlaybackPhase, PlaybackSession};
use crate::ui::{BUSY_GLYPH, ERROR_GLYPH, PLACEHOLDER_GLYPH, PLAY_GLYPH};
use iced::widget::{center, container, image, mouse_area, progress_bar, text, Column, Space, Stack};
use iced::{Element, Length};
use std::sync::Arc;

/// Size of the overlay glyphs in points.
const GLYPH_SIZE: f32 = 42.0;

/// Height of the playback progress bar in pixels.
const PROGRESS_HEIGHT: f32 = 4.0;

/// A full-bleed glyph layer used for placeholders and affordances.
fn glyph_layer<'a>(glyph: &'a str, width: f32, height: f32) -> Element<'a, Message> {
    container(center(text(glyph).size(GLYPH_SIZE)))
        .width(Length::Fixed(width))
        .height(Length::Fixed(height))
        .into()
}

/// Renders an image slide: placeholder, decoded image, or error affordance.
pub fn image_slide(slide: &ImageSlide, width: f32, height: f32) -> Element<'_, Message> {
    if slide.has_error() {
        return glyph_layer(ERROR_GLYPH, width, height);
    }

    match slide.image() {
        Some(data) => image(data.handle.clone())
            .width(Length::Fixed(width))
            .height(Length::Fixed(height))
            .into(),
        None => glyph_layer(PLACEHOLDER_GLYPH, width, height),
    }
}

/// Renders a video slide's lifecycle chrome for its current phase.
///
/// The resolved preview (or the placeholder glyph) forms the base layer;
/// phase-specific affordances stack on top. The backend's video surface,
/// when the host mounts one, replaces the preview underneath — the chrome
/// stays valid either way.
pub fn video_slide<'a>(
    session: &'a PlaybackSession,
    preview: Option<&'a Arc<ImageData>>,
    index: usize,
    width: f32,
    height: f32,
) -> Element<'a, Message> {
    let base: Element<'a, Message> = match preview {
        Some(data) => image(data.handle.clone())
            .width(Length::Fixed(width))
            .height(Length::Fixed(height))
            .into(),
        None => glyph_layer(PLACEHOLDER_GLYPH, width, height),
    };

    let overlay: Element<'a, Message> = match session.phase() {
        PlaybackPhase::Thumbnail | PlaybackPhase::Paused => {
            glyph_layer(PLAY_GLYPH, width, height)
        }
        PlaybackPhase::ResolvingThumbnail | PlaybackPhase::Loading => {
            glyph_layer(BUSY_GLYPH, width, height)
        }
        PlaybackPhase::Ready | PlaybackPhase::Playing => {
            let fraction = session.progress().unwrap_or(0.0);
            Column::new()
                .push(Space::new().height(Length::Fill))
                .push(
                    container(progress_bar(0.0..=1.0, fraction))
                        .width(Length::Fixed(width))
                        .height(Length::Fixed(PROGRESS_HEIGHT)),
                )
                .width(Length::Fixed(width))
                .height(Length::Fixed(height))
                .into()
        }
        PlaybackPhase::Error { .. } => glyph_layer(ERROR_GLYPH, width, height),
    };

    let layers = Stack::new().push(base).push(overlay);

    mouse_area(layers)
        .on_press(Message::SlideTapped(index))
        .into()
}
