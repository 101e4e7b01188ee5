//! Textual parameter parsing
//!
//! Produces a lazy, forward-only sequence of `(name, value)` pairs from a
//! source string of whitespace-separated `name=value` tokens. The parser is
//! a three-state machine (unstarted, positioned on a pair, exhausted) and
//! is restartable: every [`parse_str`](TextParamParser::parse_str) call
//! begins a fresh parse over new input.
//!
//! Values may be unquoted, single-quoted or double-quoted. Quoting is
//! resolved by inspecting the trailing delimiter of the greedy raw token:
//! when the token starts and ends with the same quote character only the
//! outermost pair is stripped, so a single-quoted value may even contain
//! interior single quotes (`x='it's'` yields `it's`). A quoted value whose
//! closing quote lies beyond the raw token continues across whitespace
//! (`x="a b"`).

use log::debug;

/// Lazy `name=value` parser over a source string.
///
/// Holds mutable cursor state; supports exactly one parse in flight.
#[derive(Debug, Default)]
pub struct TextParamParser {
    input: String,
    pos: usize,
    current: Option<(String, String)>,
}

impl TextParamParser {
    /// Create an unstarted parser.
    pub fn new() -> TextParamParser {
        TextParamParser::default()
    }

    /// Restart the state machine over new input.
    ///
    /// Returns `true` when a first pair was found, `false` when the input
    /// is empty or starts with an unparsable token (the parser is then
    /// exhausted).
    pub fn parse_str(&mut self, input: &str) -> bool {
        self.input.clear();
        self.input.push_str(input);
        self.pos = 0;
        self.current = None;
        self.advance()
    }

    /// Advance to the next pair.
    ///
    /// Once exhausted this is an idempotent no-op returning `false`.
    pub fn next(&mut self) -> bool {
        self.advance()
    }

    /// Whether the parser is currently positioned on a pair.
    pub fn has_param(&self) -> bool {
        self.current.is_some()
    }

    /// Name of the current pair, empty when not positioned.
    pub fn name(&self) -> &str {
        self.current.as_ref().map_or("", |(name, _)| name.as_str())
    }

    /// Value of the current pair, empty when not positioned.
    pub fn value(&self) -> &str {
        self.current
            .as_ref()
            .map_or("", |(_, value)| value.as_str())
    }

    fn advance(&mut self) -> bool {
        self.current = None;

        // Skip leading whitespace
        let rest = &self.input[self.pos..];
        let trimmed = rest.trim_start();
        let start = self.pos + (rest.len() - trimmed.len());
        if trimmed.is_empty() {
            self.pos = self.input.len();
            return false;
        }

        // Greedy raw token up to the next whitespace
        let token_len = trimmed
            .find(char::is_whitespace)
            .unwrap_or(trimmed.len());
        let token = &trimmed[..token_len];

        // A token without '=' is unparsable and terminates the parse;
        // pairs already produced stay produced.
        let Some(eq) = token.find('=') else {
            debug!("parameter parse stopped at unparsable token {token:?}");
            self.pos = self.input.len();
            return false;
        };
        let name = &token[..eq];
        let raw = &token[eq + 1..];

        let (value, consumed) = match quoted_span(raw) {
            QuoteSpan::Closed => (raw[1..raw.len() - 1].to_string(), token_len),
            QuoteSpan::Open(quote) => {
                // Closing quote lies beyond the raw token; the value runs
                // across whitespace up to it.
                let after_open = &trimmed[eq + 2..];
                match after_open.find(quote) {
                    Some(close) => (after_open[..close].to_string(), eq + 2 + close + 1),
                    None => {
                        debug!("parameter parse stopped at unterminated quote in {token:?}");
                        self.pos = self.input.len();
                        return false;
                    }
                }
            }
            QuoteSpan::None => (raw.to_string(), token_len),
        };

        self.pos = start + consumed;
        self.current = Some((name.to_string(), value));
        true
    }
}

enum QuoteSpan {
    /// Token starts and ends with the same quote character
    Closed,
    /// Token starts with a quote that does not close within it
    Open(char),
    /// Unquoted
    None,
}

fn quoted_span(raw: &str) -> QuoteSpan {
    let bytes = raw.as_bytes();
    match bytes.first() {
        Some(&q @ (b'"' | b'\'')) => {
            if bytes.len() >= 2 && bytes[bytes.len() - 1] == q {
                QuoteSpan::Closed
            } else {
                QuoteSpan::Open(q as char)
            }
        }
        _ => QuoteSpan::None,
    }
}
