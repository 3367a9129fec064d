use plainserve::http::response::{Response, ResponseBuilder, StatusCode};
use plainserve::http::writer::{serialize_response, ResponseWriter};

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::BadRequest.as_u16(), 400);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
    assert_eq!(StatusCode::MethodNotAllowed.as_u16(), 405);
    assert_eq!(StatusCode::RequestTimeout.as_u16(), 408);
    assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::BadRequest.reason_phrase(), "Bad Request");
    assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    assert_eq!(
        StatusCode::MethodNotAllowed.reason_phrase(),
        "Method Not Allowed"
    );
    assert_eq!(StatusCode::RequestTimeout.reason_phrase(), "Request Timeout");
    assert_eq!(
        StatusCode::InternalServerError.reason_phrase(),
        "Internal Server Error"
    );
}

#[test]
fn test_response_builder_auto_content_length() {
    let body = b"This is the body".to_vec();
    let response = ResponseBuilder::new(StatusCode::Ok)
        .body(body.clone())
        .build();

    assert_eq!(response.header("Content-length"), Some("16"));
}

#[test]
fn test_response_builder_preserves_custom_content_length() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Length", "999")
        .body(b"test".to_vec())
        .build();

    assert_eq!(response.header("Content-length"), Some("999"));
    assert_eq!(response.headers.len(), 1);
}

#[test]
fn test_response_builder_keeps_insertion_order() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-type", "text/css")
        .header("X-Frame-Options", "DENY")
        .body("a {}")
        .build();

    let names: Vec<&str> = response.headers.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(names, vec!["Content-type", "X-Frame-Options", "Content-length"]);
}

#[test]
fn test_response_builder_replaces_header_in_place() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-type", "text/plain")
        .header("X-Custom", "value")
        .header("content-type", "text/html")
        .build();

    assert_eq!(response.headers[0], ("Content-type".to_string(), "text/html".to_string()));
    assert_eq!(response.headers[1].0, "X-Custom");
}

#[test]
fn test_not_found_response() {
    let response = Response::not_found();

    assert_eq!(response.status, StatusCode::NotFound);
    assert_eq!(response.header("Content-type"), Some("text/html"));
    assert_eq!(
        response.body,
        b"<html><body><h1>File Not Found</h1></body></html>".to_vec()
    );
    assert_eq!(
        response.header("Content-length"),
        Some(response.body.len().to_string().as_str())
    );
}

#[test]
fn test_method_not_allowed_lists_allowed_methods() {
    let response = Response::method_not_allowed();

    assert_eq!(response.status, StatusCode::MethodNotAllowed);
    assert_eq!(response.header("Allow"), Some("GET, POST"));
}

#[test]
fn test_serialize_response_wire_format() {
    let response = Response::ok("text/plain", "hi");
    let bytes = serialize_response(&response);

    assert_eq!(
        bytes,
        b"HTTP/1.1 200 OK\r\nContent-type: text/plain\r\nContent-length: 2\r\n\r\nhi".to_vec()
    );
}

#[test]
fn test_serialize_response_binary_body_untouched() {
    let body = vec![0u8, 159, 146, 150, 255];
    let response = Response::ok("image/png", body.clone());
    let bytes = serialize_response(&response);

    assert!(bytes.ends_with(&body));
    let head_end = bytes.windows(4).position(|w| w == b"\r\n\r\n").unwrap();
    assert_eq!(bytes.len() - head_end - 4, body.len());
}

#[tokio::test]
async fn test_response_writer_writes_everything() {
    let response = Response::internal_error();
    let expected = serialize_response(&response);

    let mut out: Vec<u8> = Vec::new();
    ResponseWriter::new(&response)
        .write_to_stream(&mut out)
        .await
        .unwrap();

    assert_eq!(out, expected);
    assert!(out.starts_with(b"HTTP/1.1 500 Internal Server Error\r\n"));
}
