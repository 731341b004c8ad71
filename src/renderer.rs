//! # Watch Face Rendering
//!
//! This module draws the face onto any embedded-graphics `DrawTarget` with a
//! monochrome color, and offers an ASCII rendition for terminals during
//! development.
//!
//! ## Layout (144×168 by default)
//! - Time lines at rows 10, 47 and 84; the first line in bold
//! - Weekday right-aligned at row 135, bold
//! - Date right-aligned at row 150
//!
//! Every time line draws both of its slots at their current x coordinate, so a
//! frame taken mid-slide shows the outgoing and incoming text side by side.

use crate::config::DisplayConfig;
use crate::face::WatchFace;
use crate::framebuffer::FrameBuffer;
use crate::WatchError;
use embedded_graphics::{
    mono_font::{
        ascii::{FONT_6X10, FONT_6X13_BOLD, FONT_9X18, FONT_9X18_BOLD},
        MonoFont, MonoTextStyle,
    },
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};

/// Font of each time line, top to bottom.
const LINE_FONTS: [&MonoFont<'static>; 3] = [&FONT_9X18_BOLD, &FONT_9X18, &FONT_9X18];

/// Draw the whole face.
pub fn draw_face<D>(face: &WatchFace, layout: &DisplayConfig, display: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    display.clear(BinaryColor::Off)?;

    let width = layout.width as i32;
    let left_aligned = TextStyleBuilder::new().baseline(Baseline::Top).build();

    for ((line, row), font) in face
        .lines()
        .iter()
        .zip(layout.line_rows.iter())
        .zip(LINE_FONTS.iter())
    {
        let style = MonoTextStyle::new(*font, BinaryColor::On);
        for slot in line.positions() {
            // skip empty text and slots parked entirely off screen
            if slot.text.is_empty() || slot.x >= width || slot.x <= -width {
                continue;
            }
            Text::with_text_style(slot.text, Point::new(slot.x, *row), style, left_aligned)
                .draw(display)?;
        }
    }

    let right_aligned = TextStyleBuilder::new()
        .alignment(Alignment::Right)
        .baseline(Baseline::Top)
        .build();
    let right_edge = width - 2;
    let dates = face.date_lines();

    Text::with_text_style(
        &dates.day,
        Point::new(right_edge, layout.day_row),
        MonoTextStyle::new(&FONT_6X13_BOLD, BinaryColor::On),
        right_aligned,
    )
    .draw(display)?;
    Text::with_text_style(
        &dates.date,
        Point::new(right_edge, layout.date_row),
        MonoTextStyle::new(&FONT_6X10, BinaryColor::On),
        right_aligned,
    )
    .draw(display)?;

    Ok(())
}

/// Render the face into a fresh frame buffer sized from `layout`.
pub fn render_frame(face: &WatchFace, layout: &DisplayConfig) -> Result<FrameBuffer, WatchError> {
    let mut frame = FrameBuffer::new(layout.width, layout.height)?;
    draw_face(face, layout, &mut frame).unwrap_or_else(|never| match never {});
    Ok(frame)
}

/// Render the face to the terminal.
pub fn draw_ascii(face: &WatchFace, layout: &DisplayConfig) -> Result<(), WatchError> {
    let frame = render_frame(face, layout)?;
    let border = "-".repeat(layout.width as usize);
    println!("+{}+", border);
    for row in frame.to_ascii().lines() {
        println!("|{}|", row);
    }
    println!("+{}+", border);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use chrono::NaiveDate;
    use std::time::Duration;

    fn face_at(hour: u32, minute: u32) -> (WatchFace, Config) {
        let config = Config::default();
        let mut face = WatchFace::new(&config);
        let at = NaiveDate::from_ymd_opt(2026, 11, 18)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap();
        face.display_initial_time(&at);
        (face, config)
    }

    #[test]
    fn test_frame_has_text_in_every_region() {
        let (face, config) = face_at(10, 25);
        let frame = render_frame(&face, &config.display).unwrap();
        assert!(frame.lit_pixels() > 0, "No pixels were drawn to the display");

        for row in config.display.line_rows {
            assert!(frame.any_lit_in(0, row as u32, 144, row as u32 + 18));
        }
        assert!(frame.any_lit_in(0, 135, 144, 148), "weekday missing");
        assert!(frame.any_lit_in(0, 150, 144, 160), "date missing");
    }

    #[test]
    fn test_first_line_is_bold() {
        // 10:10 shows "ten" on both of the first two lines
        let (face, config) = face_at(10, 10);
        assert_eq!(face.lines()[0].visible_text(), face.lines()[1].visible_text());
        let frame = render_frame(&face, &config.display).unwrap();

        let lit_in_rows = |top: i32| {
            (top as u32..top as u32 + FONT_9X18_BOLD.character_size.height)
                .flat_map(|y| (0..144).map(move |x| (x, y)))
                .filter(|&(x, y)| frame.pixel(x, y))
                .count()
        };
        let [first, second, _] = config.display.line_rows;
        assert!(lit_in_rows(first) > lit_in_rows(second));
    }

    #[test]
    fn test_empty_third_line_draws_nothing() {
        let (face, config) = face_at(10, 0);
        let frame = render_frame(&face, &config.display).unwrap();
        assert!(!frame.any_lit_in(0, 84, 144, 102));
    }

    #[test]
    fn test_mid_slide_frame_shows_both_slots() {
        let (mut face, config) = face_at(10, 25);
        face.display_time(crate::TimeOfDay::new(10, 26).unwrap());
        face.advance(Duration::from_millis(100));
        let frame = render_frame(&face, &config.display).unwrap();

        // outgoing "five" is partly off the left edge, incoming "six" is entering
        let [incoming, outgoing] = face.lines()[2].positions();
        assert!(incoming.x > 0 && incoming.x < 144);
        assert!(outgoing.x < 0);
        assert!(frame.any_lit_in(incoming.x as u32, 84, 144, 102));
    }

    #[test]
    fn test_ascii_rendering() {
        let (face, config) = face_at(21, 7);
        draw_ascii(&face, &config.display).unwrap();
        let frame = render_frame(&face, &config.display).unwrap();
        assert_eq!(frame.to_ascii().lines().count(), 168);
    }
}
