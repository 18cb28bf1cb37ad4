use super::*;

#[test]
fn raw_base64_passes_through_with_png_default() {
    let payload = SketchPayload::parse("iVBORw0KGgoAAAANSUhEUg").unwrap();
    assert_eq!(payload.mime_type, "image/png");
    assert_eq!(payload.data, "iVBORw0KGgoAAAANSUhEUg");
}

#[test]
fn data_url_prefix_is_stripped() {
    let payload = SketchPayload::parse("data:image/png;base64,iVBORw0KGgo").unwrap();
    assert_eq!(payload.mime_type, "image/png");
    assert_eq!(payload.data, "iVBORw0KGgo");
}

#[test]
fn data_url_mime_type_is_extracted() {
    let payload = SketchPayload::parse("data:image/jpeg;base64,/9j/4AAQSkZJRg").unwrap();
    assert_eq!(payload.mime_type, "image/jpeg");
    assert_eq!(payload.data, "/9j/4AAQSkZJRg");
}

#[test]
fn empty_input_is_missing() {
    assert_eq!(SketchPayload::parse("").unwrap_err(), SketchError::Missing);
}

#[test]
fn short_input_is_rejected() {
    assert_eq!(SketchPayload::parse("abc123").unwrap_err(), SketchError::TooShort);
}

#[test]
fn data_url_with_extra_comma_is_rejected() {
    let err = SketchPayload::parse("data:image/png;base64,abc,def").unwrap_err();
    assert_eq!(err, SketchError::InvalidDataUrl);
}

#[test]
fn data_url_without_payload_is_rejected() {
    let err = SketchPayload::parse("data:image/png;base64").unwrap_err();
    assert_eq!(err, SketchError::InvalidDataUrl);
}

#[test]
fn error_messages_match_api_contract() {
    assert_eq!(SketchError::Missing.to_string(), "No image data provided");
    assert_eq!(SketchError::TooShort.to_string(), "imageData is too short");
    assert_eq!(SketchError::InvalidDataUrl.to_string(), "Invalid data URL format");
}
