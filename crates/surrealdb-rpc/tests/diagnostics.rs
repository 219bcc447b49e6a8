//! Non-fatal warnings emitted through `tracing`.

use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use surrealdb_rpc::codec::decode_scalar;
use surrealdb_rpc::util::format_duration;
use surrealdb_rpc::{auto_escape, auto_quote, Delimiter, Scalar, Table, Thing};
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Runs `f` with a subscriber that records warn-level events.
fn capture<T>(f: impl FnOnce() -> T) -> (T, String) {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(captured.clone())
        .with_max_level(Level::WARN)
        .with_ansi(false)
        .without_time()
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, captured.contents())
}

#[test]
fn test_escaping_delimited_text_warns() {
    let (escaped, logs) = capture(|| auto_escape("⟨foo-bar⟩", Delimiter::Angle).into_owned());
    assert_eq!(escaped, "⟨foo-bar⟩");
    assert!(logs.contains("WARN"), "{logs}");
    assert!(logs.contains("already delimited"), "{logs}");

    let (quoted, logs) = capture(|| auto_quote("`x y`", Delimiter::Backtick).into_owned());
    assert_eq!(quoted, "`x y`");
    assert!(logs.contains("already delimited"), "{logs}");
}

#[test]
fn test_escaping_raw_text_is_silent() {
    let (escaped, logs) = capture(|| auto_escape("foo-bar", Delimiter::Angle).into_owned());
    assert_eq!(escaped, "⟨foo-bar⟩");
    assert!(logs.is_empty(), "{logs}");
}

#[test]
fn test_table_from_escaped_name_warns() {
    let (table, logs) = capture(|| Table::new("⟨a-b⟩"));
    assert_eq!(table.literal(), "⟨a-b⟩");
    assert!(logs.contains("already delimited"), "{logs}");
}

#[test]
fn test_parsing_canonical_literals_is_silent() {
    let (thing, logs) = capture(|| Thing::parse("⟨a-b⟩:⟨c d⟩").unwrap());
    assert_eq!(thing.literal(), "⟨a-b⟩:⟨c d⟩");
    assert!(logs.is_empty(), "{logs}");
}

#[test]
fn test_nanosecond_truncation_warns() {
    let (decoded, logs) = capture(|| decode_scalar(4, b"1500ns").unwrap());
    assert_eq!(decoded, Scalar::Duration(Duration::from_micros(1)));
    assert!(logs.contains("truncating to microseconds"), "{logs}");

    let (_, logs) = capture(|| decode_scalar(4, b"2000ns").unwrap());
    assert!(logs.is_empty(), "{logs}");
}

#[test]
fn test_truncation_warning_reports_full_nanos() {
    let (decoded, logs) = capture(|| decode_scalar(4, b"18446744073709551617ns").unwrap());
    assert_eq!(
        decoded,
        Scalar::Duration(Duration::new(18_446_744_073, 709_551_000))
    );
    assert!(logs.contains("nanos=18446744073709551617"), "{logs}");
    assert!(logs.contains("lost=617"), "{logs}");
}

#[test]
fn test_duration_format_truncation_warns() {
    let (text, logs) = capture(|| format_duration(Duration::new(1, 500)));
    assert_eq!(text, "1s");
    assert!(logs.contains("sub-microsecond"), "{logs}");
}
