// SPDX-License-Identifier: MPL-2.0
//! The pager view: a horizontally snapping, one-page-at-a-time scrollable
//! over the post's slides, with the dot indicator underneath.

use crate::feed::{Message, PostCarousel};
use crate::media::MediaKind;
use crate::ui::{dots, slide, PLACEHOLDER_GLYPH};
use iced::alignment::Horizontal;
use iced::widget::scrollable::{Direction, Scrollbar, Viewport};
use iced::widget::{center, container, text, Column, Row, Scrollable};
use iced::{Element, Length};

/// Renders the carousel of one post at a fixed page size.
///
/// Every scroll report flows into [`Message::Scrolled`] together with the
/// page width, so the component can compute the settled page index.
pub fn view(post: &PostCarousel, page_width: f32, page_height: f32) -> Element<'_, Message> {
    let mut pages = Row::new();

    for item in post.carousel().items() {
        let content: Element<'_, Message> = match item.kind {
            MediaKind::Image => match post.image_slide(item.index) {
                Some(image) => slide::image_slide(image, page_width, page_height),
                None => center(text(PLACEHOLDER_GLYPH)).into(),
            },
            MediaKind::Video => match post.session(item.index) {
                Some(session) => slide::video_slide(
                    session,
                    post.preview(item.index),
                    item.index,
                    page_width,
                    page_height,
                ),
                None => center(text(PLACEHOLDER_GLYPH)).into(),
            },
        };

        pages = pages.push(
            container(content)
                .width(Length::Fixed(page_width))
                .height(Length::Fixed(page_height))
                .clip(true),
        );
    }

    let pager = Scrollable::new(pages)
        .width(Length::Fixed(page_width))
        .height(Length::Fixed(page_height))
        .direction(Direction::Horizontal(Scrollbar::hidden()))
        .on_scroll(move |viewport: Viewport| Message::Scrolled {
            offset: viewport.absolute_offset().x,
            page_width,
        });

    Column::new()
        .push(pager)
        .push(
            container(dots::view(post.dot_indicator()))
                .width(Length::Fixed(page_width))
                .align_x(Horizontal::Center),
        )
        .spacing(8)
        .into()
}
