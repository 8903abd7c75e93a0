use hand_tracker::*;
use image::Rgb;
use std::collections::VecDeque;

const WIDTH: u32 = 96;
const HEIGHT: u32 = 120;

fn scene() -> Frame {
    Frame::from_fn(WIDTH, HEIGHT, |x, _| {
        let v = 40 + (x % 8) as u8;
        Rgb([v, v + 5, v + 10])
    })
}

fn with_hand(y0: u32) -> Frame {
    let mut frame = scene();
    for y in y0..y0 + 16 {
        for x in 40..56 {
            frame.put_pixel(x, y, Rgb([210, 170, 150]));
        }
    }
    frame
}

#[test]
fn test_hand_sweeping_down_is_followed() {
    let mut frames: VecDeque<Frame> = (0..15).map(|_| scene()).collect();
    for y0 in [20, 40, 60, 80] {
        frames.push_back(with_hand(y0));
    }

    let mut tracker = MotionTracker::new(TrackerConfig::default()).expect("valid config");
    for _ in 0..15 {
        let warmup = tracker.poll(&mut frames).expect("frame");
        assert!(warmup.vertical_position >= 0);
    }

    let mut positions = Vec::new();
    for _ in 0..4 {
        let result = tracker.poll(&mut frames).expect("frame");
        assert!(result.has_detection);
        positions.push(result.vertical_position);
    }
    assert_eq!(positions, vec![28, 48, 68, 88]);

    // Source exhausted: fatal for the session
    assert!(matches!(
        tracker.poll(&mut frames),
        Err(TrackerError::CaptureFailure(_))
    ));
}

#[test]
fn test_image_sequence_replay() {
    let dir = tempfile::tempdir().expect("tempdir");
    for i in 0..12 {
        scene()
            .save(dir.path().join(format!("frame_{:03}.png", i)))
            .expect("write frame");
    }
    with_hand(50)
        .save(dir.path().join("frame_012.png"))
        .expect("write frame");

    let mut source = ImageSequence::new(dir.path()).expect("sequence");
    let mut tracker = MotionTracker::new(TrackerConfig::default()).expect("valid config");
    let mut last = None;
    while source.remaining() > 0 {
        last = Some(tracker.poll(&mut source).expect("frame"));
    }

    let last = last.expect("at least one frame");
    assert!(last.has_detection);
    assert_eq!(last.vertical_position, 58);
    assert_eq!(last.frame_height, HEIGHT as i32);
}
