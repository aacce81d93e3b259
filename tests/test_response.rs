use crest::http::response::{Response, StatusCode};
use crest::http::writer::serialize_response;

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::BadRequest.as_u16(), 400);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
    assert_eq!(StatusCode::RequestHeaderFieldsTooLarge.as_u16(), 431);
    assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    assert_eq!(
        StatusCode::RequestHeaderFieldsTooLarge.reason_phrase(),
        "Request Header Fields Too Large"
    );
}

#[test]
fn test_response_accumulates_writes() {
    let mut response = Response::new(StatusCode::Ok);
    assert!(response.is_empty());

    response.write_str("Hello, ");
    response.write(b"World!");

    assert_eq!(response.len(), 13);
    assert_eq!(response.body, b"Hello, World!".to_vec());
}

#[test]
fn test_set_header_replaces_case_insensitively() {
    let mut response = Response::new(StatusCode::Ok);
    response.set_header("Content-Type", "text/plain");
    response.set_header("content-type", "application/json");

    assert_eq!(response.headers.len(), 1);
    assert_eq!(response.header("CONTENT-TYPE"), Some("application/json"));
}

#[test]
fn test_serialize_response() {
    let mut response = Response::new(StatusCode::Ok);
    response.set_header("Content-Type", "text/plain");
    response.write_str("hi");

    let bytes = serialize_response(&response, true);

    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 2\r\n\r\nhi"
    );
}

#[test]
fn test_serialize_overrides_handler_length_and_marks_close() {
    let mut response = Response::new(StatusCode::Ok);
    response.set_header("Content-Length", "999");
    response.write_str("abc");

    let text = String::from_utf8(serialize_response(&response, false)).unwrap();

    assert!(text.contains("Content-Length: 3\r\n"));
    assert!(!text.contains("999"));
    assert!(text.contains("Connection: close\r\n"));
}

#[test]
fn test_canned_responses() {
    assert_eq!(Response::not_found().status, StatusCode::NotFound);
    assert_eq!(Response::bad_request().status, StatusCode::BadRequest);
    assert_eq!(
        Response::header_too_large().status,
        StatusCode::RequestHeaderFieldsTooLarge
    );
    assert_eq!(
        Response::internal_error().body,
        b"500 Internal Server Error".to_vec()
    );
}
