//! Log sanitization for patient identifiers.
//!
//! Examination records may carry chart numbers, UUIDs, or contact details in
//! their `id` field. Formatted log lines are scrubbed of these before they
//! reach the sink. Counts and scores are not identifying and pass through.
//!
//! Every line is capped at a configurable byte budget (see
//! `SACI_SANITIZE_MAX_BYTES`) so a runaway log line cannot stall the writer.

use regex::{Regex, RegexSet};
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

use crate::config::DEFAULT_SANITIZE_MAX_BYTES;

static PATTERNS: OnceLock<IdentifierPatterns> = OnceLock::new();

struct IdentifierPatterns {
    set: RegexSet,
    rules: Vec<(Regex, &'static str)>,
}

const RULES: [(&str, &str); 5] = [
    (
        r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}",
        "[REDACTED-UUID]",
    ),
    (r"\b\d{3}-\d{2}-\d{4}\b", "[REDACTED-SSN]"),
    (r"(?i)\b(?:MRN|chart)[:#\s-]?\d{4,10}\b", "[REDACTED-MRN]"),
    (
        r"(?i)\b[a-z0-9](?:[a-z0-9._%+-]{0,62}[a-z0-9])?@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}\b",
        "[REDACTED-EMAIL]",
    ),
    (
        r"\b(?:\+?1[-.\s]?)?\(?[0-9]{3}\)?[-.\s][0-9]{3}[-.\s]?[0-9]{4}\b",
        "[REDACTED-PHONE]",
    ),
];

fn patterns() -> &'static IdentifierPatterns {
    PATTERNS.get_or_init(|| IdentifierPatterns {
        set: RegexSet::new(RULES.iter().map(|(p, _)| *p)).expect("Valid regex set"),
        rules: RULES
            .iter()
            .map(|(p, r)| (Regex::new(p).expect("Valid regex"), *r))
            .collect(),
    })
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }

    let mut end = max_bytes;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

/// Redact identifiers from at most `max_bytes` of `input`.
#[must_use]
pub fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let patterns = patterns();
    let (prefix, truncated) = truncate_to_char_boundary(input, max_bytes);

    let mut result = prefix.to_string();
    for idx in patterns.set.matches(prefix).into_iter() {
        let (regex, replacement) = &patterns.rules[idx];
        result = regex.replace_all(&result, *replacement).into_owned();
    }

    if truncated {
        result.push_str(" [TRUNCATED]");
    }
    result
}

/// A `tracing_subscriber` writer factory that redacts each formatted line
/// before handing it to the wrapped writer.
#[derive(Debug, Clone)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
    max_bytes: usize,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn with_limit(inner: M, max_bytes: usize) -> Self {
        Self {
            inner,
            max_bytes: max_bytes.max(1),
        }
    }
}

pub struct SanitizingWriter<W> {
    inner: W,
    buffer: Vec<u8>,
    max_bytes: usize,
}

impl<W> SanitizingWriter<W>
where
    W: std::io::Write,
{
    /// The trailing newline is kept out of the byte budget and always re-emitted.
    fn write_sanitized(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        let (body, newline) = match bytes.split_last() {
            Some((b'\n', body)) => (body, true),
            _ => (bytes, false),
        };

        let text = String::from_utf8_lossy(body);
        let clean = sanitize_with_limit(&text, self.max_bytes);
        self.inner.write_all(clean.as_bytes())?;
        if newline {
            self.inner.write_all(b"\n")?;
        }
        Ok(())
    }

    fn flush_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            self.write_sanitized(&line)?;
        }
        Ok(())
    }
}

impl<W> std::io::Write for SanitizingWriter<W>
where
    W: std::io::Write,
{
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        self.flush_lines()?;

        // A line with no newline in sight: emit what we have instead of growing forever.
        if self.buffer.len() > self.max_bytes.saturating_mul(2) {
            let pending = std::mem::take(&mut self.buffer);
            self.write_sanitized(&pending)?;
            self.inner.write_all(b"\n")?;
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_lines()?;

        if !self.buffer.is_empty() {
            let pending = std::mem::take(&mut self.buffer);
            self.write_sanitized(&pending)?;
        }

        self.inner.flush()
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter {
            inner: self.inner.make_writer(),
            buffer: Vec::new(),
            max_bytes: self.max_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sanitize(input: &str) -> String {
        sanitize_with_limit(input, DEFAULT_SANITIZE_MAX_BYTES)
    }

    #[test]
    fn test_sanitize_uuid() {
        let input = "exam 550e8400-e29b-41d4-a716-446655440000 scored";
        let out = sanitize(input);
        assert!(out.contains("[REDACTED-UUID]"));
        assert!(!out.contains("550e8400"));
    }

    #[test]
    fn test_sanitize_chart_number() {
        assert!(sanitize("id=MRN:12345678").contains("[REDACTED-MRN]"));
        assert!(sanitize("id=chart-004211").contains("[REDACTED-MRN]"));
    }

    #[test]
    fn test_sanitize_email() {
        let out = sanitize("owner: patient@clinic.example.org");
        assert!(out.contains("[REDACTED-EMAIL]"));
    }

    #[test]
    fn test_scores_pass_through() {
        let line = "SACI components computed da_score=6.0 mc_score=0.0 fc_score=3.0 total_surfaces=128";
        assert_eq!(sanitize(line), line);
    }

    #[test]
    fn test_truncates_long_input() {
        let input = "a".repeat(64);
        let out = sanitize_with_limit(&input, 16);
        assert!(out.starts_with(&"a".repeat(16)));
        assert!(out.ends_with("[TRUNCATED]"));
    }

    #[test]
    fn test_truncate_respects_char_boundary() {
        let (prefix, truncated) = truncate_to_char_boundary("ééé", 3);
        assert_eq!(prefix, "é");
        assert!(truncated);
    }

    #[derive(Clone, Default)]
    struct SharedBuf(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writer_redacts_lines() {
        let sink = SharedBuf::default();
        let handle = sink.clone();
        let make = SanitizingMakeWriter::with_limit(move || handle.clone(), DEFAULT_SANITIZE_MAX_BYTES);
        let mut writer = make.make_writer();
        writer
            .write_all(b"scored exam 550e8400-e29b-41d4-a716-446655440000\n")
            .unwrap();
        writer.flush().unwrap();

        let written = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
        assert_eq!(written, "scored exam [REDACTED-UUID]\n");
    }

    #[test]
    fn test_truncated_line_keeps_its_newline() {
        let sink = SharedBuf::default();
        let handle = sink.clone();
        let make = SanitizingMakeWriter::with_limit(move || handle.clone(), 16);

        make.make_writer()
            .write_all(b"first event line of 24b\n")
            .unwrap();
        make.make_writer().write_all(b"second\n").unwrap();

        let written = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines, ["first event line [TRUNCATED]", "second"]);
        assert!(written.ends_with('\n'));
    }

    #[test]
    fn test_unterminated_overflow_is_split_off() {
        let sink = SharedBuf::default();
        let handle = sink.clone();
        let make = SanitizingMakeWriter::with_limit(move || handle.clone(), 4);

        let mut writer = make.make_writer();
        writer.write_all(b"abcdefghij").unwrap();
        writer.write_all(b"tail\n").unwrap();

        let written = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
        assert_eq!(written, "abcd [TRUNCATED]\ntail\n");
    }
}
