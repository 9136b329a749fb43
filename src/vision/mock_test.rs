use super::*;
use crate::driver::Frame;

fn blank_frame() -> Frame {
    Frame { width: 1, height: 1, rgba: vec![0; 4] }
}

#[tokio::test]
async fn find_text_matches_case_insensitively() {
    let vision = MockVision::new();
    vision.with_text("Sign In", Point { x: 10.0, y: 20.0 });
    let found = vision.find_text(&blank_frame(), "sign in").await.unwrap();
    assert_eq!(found, Some(Point { x: 10.0, y: 20.0 }));
}

#[tokio::test]
async fn find_text_returns_none_when_absent() {
    let vision = MockVision::new();
    let found = vision.find_text(&blank_frame(), "nope").await.unwrap();
    assert_eq!(found, None);
}

#[tokio::test]
async fn match_template_returns_scripted_point() {
    let vision = MockVision::new();
    vision.with_template_match(Point { x: 5.0, y: 5.0 });
    let found = vision
        .match_template(&blank_frame(), &blank_frame(), 0.8)
        .await
        .unwrap();
    assert_eq!(found, Some(Point { x: 5.0, y: 5.0 }));
}
