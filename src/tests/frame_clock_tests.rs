//! Animation timing in the binary's event loop.

use crate::restart_frame_clock;
use chrono::NaiveDate;
use std::time::{Duration, Instant};
use text_watch_lib::{config::Config, face::WatchFace, TimeOfDay};

fn face_at_ten() -> WatchFace {
    let mut face = WatchFace::new(&Config::default());
    let at = NaiveDate::from_ymd_opt(2026, 10, 16)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();
    face.display_initial_time(&at);
    face
}

/// An idle face starts counting from the update.
#[test]
fn idle_face_restarts_frame_clock() {
    let face = face_at_ten();
    let start = Instant::now();
    let mut last_frame = start;
    let now = start + Duration::from_secs(60);

    restart_frame_clock(&face, &mut last_frame, now);
    assert_eq!(last_frame, now);
}

/// A minute tick arriving mid-slide keeps the running slide's elapsed time.
#[test]
fn tick_mid_slide_keeps_frame_clock() {
    let mut face = face_at_ten();
    face.display_time(TimeOfDay::new(10, 1).unwrap());
    assert!(face.is_animating());

    let start = Instant::now();
    let mut last_frame = start;
    restart_frame_clock(&face, &mut last_frame, start + Duration::from_millis(300));
    assert_eq!(last_frame, start);

    // the next frame advances the slide by the full 300 ms and finishes it
    face.display_time(TimeOfDay::new(10, 2).unwrap());
    let now = start + Duration::from_millis(400);
    assert!(face.advance(now - last_frame));
    assert!(!face.advance(Duration::from_millis(400)));
    assert_eq!(face.time(), TimeOfDay::new(10, 2).unwrap());
}
