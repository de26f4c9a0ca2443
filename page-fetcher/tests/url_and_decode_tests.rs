use page_fetcher::http::{charset_from_content_type, decode_body};
use page_fetcher::{classify_url, UrlKind};

#[test]
fn classifies_book_chapter_and_rejects_others() {
    assert_eq!(classify_url("https://example.org/book?&res=123"), Ok(UrlKind::Book));
    assert_eq!(classify_url("https://ctext.org/analects/zh"), Ok(UrlKind::Book));
    assert_eq!(classify_url("https://example.org/book?chapter=4"), Ok(UrlKind::Chapter));
    assert!(classify_url("https://example.org/about").is_err());
}

#[test]
fn book_marker_takes_precedence_over_chapter_marker() {
    assert_eq!(classify_url("https://example.org/x?chapter=2&res=9"), Ok(UrlKind::Book));
}

#[test]
fn non_http_input_is_rejected() {
    let err = classify_url("ctext.org/analects/zh").expect_err("scheme is required");
    assert_eq!(err.url, "ctext.org/analects/zh");
    assert!(classify_url("ftp://example.org/book?chapter=1").is_err());
}

#[test]
fn charset_parameter_is_found_case_insensitively() {
    assert_eq!(charset_from_content_type("text/html; charset=GBK"), Some("GBK"));
    assert_eq!(charset_from_content_type("text/html;Charset=\"utf-8\""), Some("utf-8"));
    assert_eq!(charset_from_content_type("text/plain"), None);
}

#[test]
fn body_decoding_honors_label_and_bom() {
    assert_eq!(decode_body(&[0xD6, 0xD0], Some("gbk")), "中");
    assert_eq!(decode_body("\u{feff}後".as_bytes(), None), "後");
    assert_eq!(decode_body("後".as_bytes(), Some("no-such-label")), "後");
}
