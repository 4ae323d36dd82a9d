use duplex::prelude::*;

#[derive(Debug, PartialEq)]
struct Request<'a> {
    method: &'a [u8],
    uri: &'a [u8],
    version: &'a [u8],
}

#[derive(Debug, PartialEq)]
struct Header<'a> {
    name: &'a [u8],
    value: Vec<&'a [u8]>,
}

fn is_token(c: &u8) -> bool {
    !matches!(
        *c,
        0..=31
            | 128..=255
            | b'('
            | b')'
            | b'<'
            | b'>'
            | b'@'
            | b','
            | b';'
            | b':'
            | b'\\'
            | b'\''
            | b'/'
            | b'['
            | b']'
            | b'?'
            | b'='
            | b'{'
            | b'}'
            | b' '
    )
}

fn not_line_ending(c: &u8) -> bool {
    *c != b'\r' && *c != b'\n'
}

fn is_not_space(c: &u8) -> bool {
    *c != b' '
}

fn is_horizontal_space(c: &u8) -> bool {
    *c == b' ' || *c == b'\t'
}

fn is_version(c: &u8) -> bool {
    c.is_ascii_digit() || *c == b'.'
}

fn request_line<'a>() -> impl Printer<&'a [u8], Output = Request<'a>> {
    take_while::<_, &'a [u8]>(is_token)
        .then_ignore(just(" "))
        .then(take_while(is_not_space))
        .then_ignore(just(" HTTP/"))
        .then(take_while(is_version))
        .then_ignore(newline())
        .convert(
            |((method, uri), version)| Request { method, uri, version },
            |r: Request<'a>| ((r.method, r.uri), r.version),
        )
}

// Folded continuation lines are further values of the same header.
fn header_value<'a>() -> impl Printer<&'a [u8], Output = &'a [u8]> {
    take_while::<_, &'a [u8]>(is_horizontal_space)
        .at_least(1)
        .printing(just(" "))
        .ignore_then(take_while(not_line_ending))
        .then_ignore(newline())
}

fn header<'a>() -> impl Printer<&'a [u8], Output = Header<'a>> {
    take_while::<_, &'a [u8]>(is_token)
        .then_ignore(just(":"))
        .then(header_value().many())
        .convert(
            |(name, value)| Header { name, value },
            |h: Header<'a>| (h.name, h.value),
        )
}

fn request<'a>() -> impl Printer<&'a [u8], Output = (Request<'a>, Vec<Header<'a>>)> {
    request_line().then(header().many())
}

const REQUEST: &str = concat!(
    "GET / HTTP/1.1\n",
    "Host: www.reddit.com\n",
    "User-Agent: Mozilla/5.0 (Macintosh; Intel Mac OS X 10.8; rv:15.0) Gecko/20100101 Firefox/15.0.1\n",
    "Accept: text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8\n",
    "Accept-Language: en-us,en;q=0.5\n",
    "Accept-Encoding: gzip, deflate\n",
    "Connection: keep-alive\n",
);

fn header_of<'a>(name: &'a str, value: &'a str) -> Header<'a> {
    Header {
        name: name.as_bytes(),
        value: vec![value.as_bytes()],
    }
}

#[test]
fn parse_request() {
    let (request_line, headers) = request().parse_all(REQUEST.as_bytes()).unwrap();

    assert_eq!(
        request_line,
        Request {
            method: b"GET",
            uri: b"/",
            version: b"1.1",
        },
    );
    assert_eq!(
        headers,
        vec![
            header_of("Host", "www.reddit.com"),
            header_of(
                "User-Agent",
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.8; rv:15.0) Gecko/20100101 Firefox/15.0.1",
            ),
            header_of(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
            header_of("Accept-Language", "en-us,en;q=0.5"),
            header_of("Accept-Encoding", "gzip, deflate"),
            header_of("Connection", "keep-alive"),
        ],
    );
}

#[test]
fn reprint_request() {
    let output = request().parse_all(REQUEST.as_bytes()).unwrap();

    assert_eq!(request().print_to_buffer(output), Ok(REQUEST.as_bytes().to_vec()));
}

#[test]
fn folded_header() {
    let input = b"X-Long:  first\r\n\tsecond\r\n";

    let parsed = header().parse_all(&input[..]).unwrap();
    assert_eq!(
        parsed,
        Header {
            name: b"X-Long",
            value: vec![&b"first"[..], &b"second"[..]],
        },
    );
    // Line endings and indentation print in their canonical form.
    assert_eq!(header().print_to_buffer(parsed), Ok(b"X-Long: first\n second\n".to_vec()));
}

#[test]
fn malformed_header_is_left_unconsumed() {
    let mut input = &b"GET /index.html HTTP/1.0\nHost www.example.com\n"[..];

    let (request_line, headers) = request().parse(&mut input).unwrap();
    assert_eq!(request_line.uri, b"/index.html");
    assert!(headers.is_empty());
    assert_eq!(input, b"Host www.example.com\n");
}

#[test]
fn unprintable_header_value_truncates_headers() {
    let headers = vec![
        header_of("Host", "example.com"),
        header_of("Connection", "close"),
        Header {
            name: b"Bad",
            value: vec![&b"line\nbreak"[..]],
        },
        header_of("Accept", "*/*"),
        header_of("Accept-Encoding", "gzip"),
    ];

    // A header whose value can't be printed ends the header list, like a header that fails to parse.
    assert_eq!(
        header().many().print_to_buffer(headers),
        Ok(b"Host: example.com\nConnection: close\n".to_vec()),
    );

    let mut buffer = b"GET / HTTP/1.1\n".to_vec();
    let bad = Header {
        name: b"Bad",
        value: vec![&b"line\nbreak"[..]],
    };
    assert_eq!(header().many().at_least(2).print(vec![header_of("Host", "a"), bad], &mut buffer), Ok(()));
    assert_eq!(buffer, b"GET / HTTP/1.1\nHost: a\n");
}
