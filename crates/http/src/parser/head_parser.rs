//! The request head parser state machine.
//!
//! The parser consumes complete lines (line framing, including line-ending
//! tolerance and maximum line length, belongs to the framer in front of it)
//! and accumulates a request line plus headers until the blank line that
//! ends the head section.
//!
//! # States
//!
//! ```text
//! AwaitingRequestLine --request line--> AccumulatingHeaders
//! AccumulatingHeaders --header line--> AccumulatingHeaders
//! AccumulatingHeaders --blank line---> AwaitingRequestLine (head emitted)
//! ```
//!
//! The partially built head only exists as data of the
//! `AccumulatingHeaders` variant, so no code path outside the parser can
//! observe or mutate it. A malformed line resets the parser to
//! `AwaitingRequestLine`; the caller answers with a 400 and the connection
//! keeps going. There is no pipelining: a new request line is only accepted
//! once the previous head has been emitted.

use http::{HeaderName, HeaderValue, Method};

use crate::ensure;
use crate::protocol::{HeaderCollection, ParseError, RequestHead};

/// A line-at-a-time parser for HTTP/1.x request heads.
#[derive(Debug)]
pub struct HeadParser {
    state: State,
}

#[derive(Debug)]
enum State {
    AwaitingRequestLine,
    AccumulatingHeaders(PendingHead),
}

/// Parser workspace while headers are still arriving. Destroyed the moment
/// the blank line fires dispatch, or on a malformed line.
#[derive(Debug)]
struct PendingHead {
    method: Method,
    target: String,
    version: String,
    headers: HeaderCollection,
}

impl HeadParser {
    pub fn new() -> Self {
        Self { state: State::AwaitingRequestLine }
    }

    /// Feeds one framed line into the state machine.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(head))`: the blank line was observed, the head is complete
    /// - `Ok(None)`: the line was consumed, more lines are needed
    /// - `Err(_)`: the line was malformed; the parser has reset itself and
    ///   the caller should emit a 400-class response
    pub fn line_received(&mut self, line: &str) -> Result<Option<RequestHead>, ParseError> {
        match &mut self.state {
            State::AwaitingRequestLine => match parse_request_line(line) {
                Ok(pending) => {
                    self.state = State::AccumulatingHeaders(pending);
                    Ok(None)
                }
                // the offending line is discarded, the parser keeps waiting
                // for a request line
                Err(e) => Err(e),
            },

            State::AccumulatingHeaders(_) if line.is_empty() => {
                let State::AccumulatingHeaders(pending) =
                    std::mem::replace(&mut self.state, State::AwaitingRequestLine)
                else {
                    unreachable!("state checked by match arm");
                };
                Ok(Some(RequestHead::new(pending.method, pending.target, pending.version, pending.headers)))
            }

            State::AccumulatingHeaders(pending) => match parse_header_line(line) {
                Ok((name, value)) => {
                    pending.headers.append(name, value);
                    Ok(None)
                }
                Err(e) => {
                    self.state = State::AwaitingRequestLine;
                    Err(e)
                }
            },
        }
    }

    /// True when the parser is between requests.
    pub fn is_idle(&self) -> bool {
        matches!(self.state, State::AwaitingRequestLine)
    }
}

impl Default for HeadParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits a request line on whitespace into exactly three tokens.
///
/// The target and version tokens are kept verbatim; the method goes through
/// [`Method::from_bytes`], which accepts any valid token (extension methods
/// included) and rejects the rest.
fn parse_request_line(line: &str) -> Result<PendingHead, ParseError> {
    let mut tokens = line.split_ascii_whitespace();
    let (Some(method), Some(target), Some(version), None) = (tokens.next(), tokens.next(), tokens.next(), tokens.next())
    else {
        return Err(ParseError::malformed_request_line(line));
    };

    let method = Method::from_bytes(method.as_bytes()).map_err(|_| ParseError::malformed_request_line(line))?;

    Ok(PendingHead {
        method,
        target: target.to_owned(),
        version: version.to_owned(),
        headers: HeaderCollection::new(),
    })
}

/// Splits a header line on the first colon, trimming whitespace around the
/// value only.
///
/// Two deliberate conformance decisions live here:
///
/// - a line with no colon is rejected with a 400 instead of being left as an
///   unhandled split failure
/// - obs-fold continuation lines (leading whitespace) are rejected with a
///   400 rather than folded, as RFC 7230 permits a server to do
fn parse_header_line(line: &str) -> Result<(HeaderName, HeaderValue), ParseError> {
    ensure!(
        !line.starts_with([' ', '\t']),
        ParseError::malformed_header_line("obs-fold header continuation is not supported")
    );

    let Some((name, value)) = line.split_once(':') else {
        return Err(ParseError::malformed_header_line(format!("no colon in header line {line:?}")));
    };

    let name =
        HeaderName::from_bytes(name.as_bytes()).map_err(|_| ParseError::malformed_header_line(format!("invalid header name {name:?}")))?;
    let value = HeaderValue::from_str(value.trim())
        .map_err(|_| ParseError::malformed_header_line("invalid header value"))?;

    Ok((name, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(parser: &mut HeadParser, lines: &[&str]) -> Result<Option<RequestHead>, ParseError> {
        let mut last = Ok(None);
        for line in lines {
            last = parser.line_received(line);
        }
        last
    }

    #[test]
    fn three_tokens_parsed_verbatim() {
        let mut parser = HeadParser::new();

        let head = feed(&mut parser, &["METHOD target VERSION", ""]).unwrap().unwrap();

        assert_eq!(head.method().as_str(), "METHOD");
        assert_eq!(head.target(), "target");
        assert_eq!(head.version(), "VERSION");
        assert!(head.headers().is_empty());
        assert!(parser.is_idle());
    }

    #[test]
    fn request_line_with_wrong_token_count_is_rejected() {
        let mut parser = HeadParser::new();

        for line in ["GET /", "GET / HTTP/1.1 extra", ""] {
            assert!(matches!(
                parser.line_received(line),
                Err(ParseError::MalformedRequestLine { .. })
            ));
            assert!(parser.is_idle());
        }

        // the parser recovers: a well-formed request still parses afterwards
        let head = feed(&mut parser, &["GET / HTTP/1.1", ""]).unwrap().unwrap();
        assert_eq!(head.target(), "/");
    }

    #[test]
    fn header_lines_split_on_first_colon_and_trim_value() {
        let mut parser = HeadParser::new();

        let head = feed(
            &mut parser,
            &["GET / HTTP/1.1", "Host:  example.com ", "Accept: text/plain;q=0.9", ""],
        )
        .unwrap()
        .unwrap();

        assert_eq!(head.headers().get("host").unwrap().to_str().unwrap(), "example.com");
        // only the first colon splits
        assert_eq!(head.headers().get("accept").unwrap().to_str().unwrap(), "text/plain;q=0.9");
    }

    #[test]
    fn repeated_header_names_accumulate_in_order() {
        let mut parser = HeadParser::new();

        let head = feed(&mut parser, &["GET / HTTP/1.1", "A: 1", "B: 2", "A: 3", ""]).unwrap().unwrap();

        let a: Vec<&str> = head.headers().get_all("A").iter().map(|v| v.to_str().unwrap()).collect();
        assert_eq!(a, ["1", "3"]);
        let b: Vec<&str> = head.headers().get_all("b").iter().map(|v| v.to_str().unwrap()).collect();
        assert_eq!(b, ["2"]);
    }

    #[test]
    fn header_line_without_colon_is_rejected_and_resets() {
        let mut parser = HeadParser::new();

        assert!(parser.line_received("GET / HTTP/1.1").unwrap().is_none());
        assert!(matches!(
            parser.line_received("no colon here"),
            Err(ParseError::MalformedHeaderLine { .. })
        ));
        assert!(parser.is_idle());

        // the pending head was discarded with it
        let head = feed(&mut parser, &["POST /new HTTP/1.1", ""]).unwrap().unwrap();
        assert_eq!(head.target(), "/new");
        assert!(head.headers().is_empty());
    }

    #[test]
    fn obs_fold_continuation_is_rejected() {
        let mut parser = HeadParser::new();

        assert!(parser.line_received("GET / HTTP/1.1").unwrap().is_none());
        assert!(parser.line_received("X-Long: part one").unwrap().is_none());
        assert!(matches!(
            parser.line_received("\tpart two"),
            Err(ParseError::MalformedHeaderLine { .. })
        ));
        assert!(parser.is_idle());
    }

    #[test]
    fn blank_line_before_any_request_line_is_rejected() {
        let mut parser = HeadParser::new();

        assert!(matches!(parser.line_received(""), Err(ParseError::MalformedRequestLine { .. })));
    }

    #[test]
    fn second_request_only_starts_after_first_completes() {
        let mut parser = HeadParser::new();

        assert!(parser.line_received("GET /a HTTP/1.1").unwrap().is_none());
        // a line that looks like a request line is still a header line here
        assert!(matches!(
            parser.line_received("GET /b HTTP/1.1"),
            Err(ParseError::MalformedHeaderLine { .. })
        ));
    }

    #[test]
    fn sequential_heads_on_one_parser() {
        let mut parser = HeadParser::new();

        let first = feed(&mut parser, &["GET /one HTTP/1.1", ""]).unwrap().unwrap();
        let second = feed(&mut parser, &["PUT /two HTTP/1.0", "Host: x", ""]).unwrap().unwrap();

        assert_eq!(first.target(), "/one");
        assert_eq!(second.method(), &Method::PUT);
        assert_eq!(second.target(), "/two");
        assert_eq!(second.version(), "HTTP/1.0");
    }
}
