// SPDX-License-Identifier: MPL-2.0
//! Dot indicator for the pager.

use crate::carousel::DotIndicator;
use crate::feed::Message;
use iced::widget::{text, Row, Space};
use iced::Element;

/// Dot size in points.
const DOT_SIZE: f32 = 9.0;

/// Spacing between dots in points.
const DOT_SPACING: f32 = 6.0;

/// Renders one dot per page, highlighting the active one.
///
/// Single-page carousels render nothing; a lone dot is noise.
pub fn view(indicator: DotIndicator) -> Element<'static, Message> {
    if indicator.total <= 1 {
        return Space::new().into();
    }

    let mut row = Row::new().spacing(DOT_SPACING);
    for index in 0..indicator.total {
        let glyph = if index == indicator.active {
            "●"
        } else {
            "○"
        };
        row = row.push(text(glyph).size(DOT_SIZE));
    }
    row.into()
}
