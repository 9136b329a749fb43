use super::*;

fn solid_frame() -> Frame {
    Frame { width: 4, height: 4, rgba: vec![128; 4 * 4 * 4] }
}

#[test]
fn jpeg_encode_produces_nonempty_bytes() {
    let (bytes, ext) = DefaultCodec.encode(&solid_frame(), false).unwrap();
    assert_eq!(ext, "jpeg");
    assert!(!bytes.is_empty());
}

#[test]
fn png_encode_produces_nonempty_bytes() {
    let (bytes, ext) = DefaultCodec.encode(&solid_frame(), true).unwrap();
    assert_eq!(ext, "png");
    assert!(!bytes.is_empty());
}

#[test]
fn malformed_frame_errors() {
    let frame = Frame { width: 4, height: 4, rgba: vec![0; 3] };
    assert!(DefaultCodec.encode(&frame, false).is_err());
}
