use std::borrow::Cow;

/// One line of the response body after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame<'a> {
    Blank,
    /// `:` prefixed keep-alive or comment.
    Comment,
    /// `event: <name>`. Informational only.
    Event(&'a str),
    /// Payload of a `data:` line with the prefix removed.
    Data(&'a str),
    Unrecognized,
}

/// Classifies a single line. Surrounding whitespace (including a trailing
/// `\r` from CRLF bodies) is ignored.
pub fn classify_line(line: &str) -> Frame<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Frame::Blank;
    }
    if line.starts_with(':') {
        return Frame::Comment;
    }
    if let Some(rest) = line.strip_prefix("event:") {
        return Frame::Event(rest.trim_start());
    }
    if let Some(rest) = line.strip_prefix("data:") {
        return Frame::Data(rest.trim_start());
    }
    Frame::Unrecognized
}

/// Accumulates raw chunk bytes and hands back complete `\n`-terminated lines.
///
/// Lines are cut on raw bytes and decoded only once complete, so a UTF-8
/// sequence split across chunks is never mangled.
#[derive(Default, Debug)]
pub struct LineBuffer {
    buf: Vec<u8>,
}

impl LineBuffer {
    /// Appends a chunk and drains every complete line, without terminators.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(chunk);
        let Some(last_newline) = self.buf.iter().rposition(|b| *b == b'\n') else {
            return Vec::new();
        };
        let complete: Vec<u8> = self.buf.drain(..=last_newline).collect();
        complete[..last_newline]
            .split(|b| *b == b'\n')
            .map(decode_line)
            .collect()
    }

    /// Number of buffered bytes that do not yet form a complete line.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    /// Takes the unterminated remainder, if any.
    pub fn finish(&mut self) -> Option<String> {
        if self.buf.is_empty() {
            return None;
        }
        let rest = std::mem::take(&mut self.buf);
        Some(decode_line(&rest))
    }
}

fn decode_line(bytes: &[u8]) -> String {
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(s) => s.to_owned(),
        Cow::Owned(s) => {
            tracing::debug!(len = bytes.len(), "line contained invalid UTF-8");
            s
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_every_frame_form() {
        assert_eq!(classify_line(""), Frame::Blank);
        assert_eq!(classify_line("   \r"), Frame::Blank);
        assert_eq!(classify_line(": keep-alive"), Frame::Comment);
        assert_eq!(classify_line("event: message"), Frame::Event("message"));
        assert_eq!(classify_line("event: error"), Frame::Event("error"));
        assert_eq!(classify_line("data: {\"a\":1}\r"), Frame::Data("{\"a\":1}"));
        assert_eq!(classify_line("data:{}"), Frame::Data("{}"));
        assert_eq!(classify_line("id: 7"), Frame::Unrecognized);
        assert_eq!(classify_line("retry: 100"), Frame::Unrecognized);
    }

    #[test]
    fn line_buffer_holds_partial_lines_across_chunks() {
        let mut buffer = LineBuffer::default();
        assert_eq!(buffer.push(b"event: message\ndata: {\"x\"").len(), 1);
        assert_eq!(buffer.pending(), "data: {\"x\"".len());

        let lines = buffer.push(b":1}\n\n");
        assert_eq!(lines, vec!["data: {\"x\":1}".to_string(), String::new()]);
        assert_eq!(buffer.pending(), 0);
        assert_eq!(buffer.finish(), None);
    }

    #[test]
    fn line_buffer_tolerates_empty_chunks() {
        let mut buffer = LineBuffer::default();
        assert!(buffer.push(b"").is_empty());
        assert!(buffer.push(b"abc").is_empty());
        assert!(buffer.push(b"").is_empty());
        assert_eq!(buffer.push(b"\n"), vec!["abc".to_string()]);
    }

    #[test]
    fn split_codepoint_is_reassembled() {
        let text = "data: héllo ✓\n".as_bytes();
        let split = text.iter().position(|b| *b == 0xE2).expect("check mark") + 1;

        let mut buffer = LineBuffer::default();
        assert!(buffer.push(&text[..split]).is_empty());
        assert_eq!(buffer.push(&text[split..]), vec!["data: héllo ✓".to_string()]);
    }

    #[test]
    fn finish_returns_unterminated_remainder() {
        let mut buffer = LineBuffer::default();
        buffer.push(b"data: {}\ndata: {\"tail\":true}");
        assert_eq!(buffer.finish().as_deref(), Some("data: {\"tail\":true}"));
        assert_eq!(buffer.pending(), 0);
    }
}
