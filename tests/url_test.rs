//! Identifier extraction property tests

use bilicmt::crawler::url::extract_bvid;

#[test]
fn extracts_bvid_from_typical_urls() {
    let cases = [
        (
            "https://www.bilibili.com/video/BV1yW421N7aH",
            "BV1yW421N7aH",
        ),
        (
            "https://www.bilibili.com/video/BV1tCdUYPEdL/?share_source=copy_web",
            "BV1tCdUYPEdL",
        ),
        ("https://b23.tv/BV1xx411c7mD", "BV1xx411c7mD"),
        ("watch this: BV1a2B3c4D5e !!", "BV1a2B3c4D5e"),
        ("BV1234", "BV1234"),
    ];

    for (url, expected) in cases {
        assert_eq!(extract_bvid(url).unwrap(), expected, "url: {url}");
    }
}

#[test]
fn rejects_urls_without_bvid() {
    let cases = [
        "https://www.bilibili.com/",
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
        "https://www.bilibili.com/video/av170001",
        "bv1yW421N7aH lowercase prefix",
        "",
    ];

    for url in cases {
        assert!(extract_bvid(url).is_err(), "url should be rejected: {url}");
    }
}

#[test]
fn match_stops_at_non_alphanumeric() {
    assert_eq!(
        extract_bvid("https://www.bilibili.com/video/BV1yW421N7aH?p=2").unwrap(),
        "BV1yW421N7aH"
    );
}

#[test]
fn error_message_names_the_url() {
    let err = extract_bvid("https://example.com/nothing").unwrap_err();
    assert!(err.to_string().contains("https://example.com/nothing"));
}
