use creolemark::page::merge_fragment;
use creolemark::Category::Block;
use creolemark::{Boilerplate, MarkedBuffer, MarkerKind, PageError, PageOptions};
use pretty_assertions::assert_eq;

const TEMPLATE: &str = concat!(
    "<html>\r\n<head>\r\n$(pageHeaders)</head>\r\n",
    "<body>\r\n$(pageContent)\r\n</body>\r\n</html>\r\n",
);

fn fragment() -> String {
    let mut out = MarkedBuffer::new();
    out.push_marker(MarkerKind::open(Block, "p")).unwrap();
    out.push_str("Hello");
    out.push_marker(MarkerKind::close(Block, "p")).unwrap();
    out.finish().unwrap()
}

#[test]
fn resolved_fragment_into_page() {
    let boilerplate = Boilerplate::new(TEMPLATE).unwrap();
    let options = PageOptions {
        css_hrefs: vec!["site.css".to_string()],
        ..PageOptions::default()
    };
    let page = boilerplate.merge(&fragment(), &options).unwrap();
    let expected = concat!(
        "<html>\n<head>\n",
        r#"<link id="auto01" class="auto" rel="stylesheet" type="text/css" href="site.css" />"#,
        "\n</head>\n<body>\n<p>Hello</p>\n</body>\n</html>\n",
    );
    assert_eq!(page, expected);
}

#[test]
fn page_with_crlf_output() {
    let boilerplate = Boilerplate::new(TEMPLATE).unwrap();
    let options = PageOptions {
        line_ending: "\r\n".to_string(),
        ..PageOptions::default()
    };
    let page = boilerplate.merge(&fragment(), &options).unwrap();
    assert_eq!(
        page,
        "<html>\r\n<head>\r\n</head>\r\n<body>\r\n<p>Hello</p>\r\n</body>\r\n</html>\r\n"
    );
}

#[test]
fn target_window_without_headers_point() {
    let boilerplate = Boilerplate::new("<body>$(!pageContent)</body>").unwrap();
    let options = PageOptions {
        default_target_window: Some("_blank".to_string()),
        ..PageOptions::default()
    };
    let err = boilerplate.merge("x", &options).unwrap_err();
    assert_eq!(err, PageError::MissingHeadersPoint);
    assert!(err.to_string().contains("'pageHeaders' insertion-point"));
}

#[test]
fn fragment_without_boilerplate() {
    let options = PageOptions::default();
    assert_eq!(merge_fragment(&fragment(), &options), "<p>Hello</p>");
}
