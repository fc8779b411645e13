//! In-memory logging for the console.
//!
//! # Architecture
//!
//! ```text
//! log::info!() etc.        LogStream              `logs` command
//! ────────────────        ─────────              ──────────────
//!
//! StreamLogger ─────────▶ [L0][L1][L2] ────────▶ drain_to(term)
//! formats record          fixed ring             prints and empties
//! never blocks            drops when full
//! ```
//!
//! # Rules
//!
//! - Logging never blocks and never allocates
//! - Messages may be dropped if the ring is full; drops are counted
//! - One producer and one consumer. Both run in the same execution context,
//!   so the ring only uses atomic loads and stores (no read-modify-write,
//!   which is unavailable before the MMU is on)

use core::cell::UnsafeCell;
use core::fmt::{self, Write};
use core::sync::atomic::{AtomicU32, Ordering};

/// Maximum message length.
pub const MAX_MSG_LEN: usize = 120;

/// Log buffer size (number of entries).
pub const LOG_BUFFER_SIZE: usize = 64;

/// Log level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl LogLevel {
    /// Convert to string for output.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => LogLevel::Error,
            log::Level::Warn => LogLevel::Warn,
            log::Level::Info => LogLevel::Info,
            log::Level::Debug => LogLevel::Debug,
            log::Level::Trace => LogLevel::Trace,
        }
    }
}

/// A single log entry.
#[derive(Clone, Copy)]
#[repr(C)]
pub struct LogEntry {
    /// Timestamp in microseconds.
    pub timestamp_us: i64,
    pub level: LogLevel,
    /// Message length.
    pub len: u8,
    /// Message bytes (not null-terminated).
    pub msg: [u8; MAX_MSG_LEN],
}

impl LogEntry {
    const EMPTY: LogEntry = LogEntry {
        timestamp_us: 0,
        level: LogLevel::Info,
        len: 0,
        msg: [0; MAX_MSG_LEN],
    };

    /// Message text.
    pub fn message(&self) -> &str {
        core::str::from_utf8(&self.msg[..self.len as usize]).unwrap_or("<invalid utf8>")
    }
}

impl Default for LogEntry {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Fixed-size log ring (single producer, single consumer).
///
/// - Push never blocks (drops message if full)
/// - Drain runs whenever the operator asks for it
pub struct LogStream<const N: usize = LOG_BUFFER_SIZE> {
    entries: UnsafeCell<[LogEntry; N]>,
    write_idx: AtomicU32,
    read_idx: AtomicU32,
    dropped: AtomicU32,
}

// SAFETY: One producer owns write_idx and the slot it points at, one
// consumer owns read_idx. A slot is published by the Release store of
// write_idx and handed back by the Release store of read_idx.
unsafe impl<const N: usize> Sync for LogStream<N> {}
unsafe impl<const N: usize> Send for LogStream<N> {}

impl<const N: usize> LogStream<N> {
    const MASK: usize = N - 1;

    /// Create a new empty log stream.
    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "Log buffer size must be power of 2");

        Self {
            entries: UnsafeCell::new([LogEntry::EMPTY; N]),
            write_idx: AtomicU32::new(0),
            read_idx: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
        }
    }

    /// Push a log entry (never blocks).
    ///
    /// Returns `true` if message was queued, `false` if dropped (ring full).
    /// Messages longer than [`MAX_MSG_LEN`] are truncated.
    #[inline]
    pub fn push(&self, timestamp_us: i64, level: LogLevel, msg: &[u8]) -> bool {
        let write = self.write_idx.load(Ordering::Relaxed);
        let read = self.read_idx.load(Ordering::Acquire);

        if write.wrapping_sub(read) >= N as u32 {
            let dropped = self.dropped.load(Ordering::Relaxed);
            self.dropped.store(dropped.saturating_add(1), Ordering::Relaxed);
            return false;
        }

        let idx = (write as usize) & Self::MASK;

        // SAFETY: single producer; the consumer does not touch this slot
        // until write_idx moves past it.
        unsafe {
            let entry = &mut (*self.entries.get())[idx];
            entry.timestamp_us = timestamp_us;
            entry.level = level;
            entry.len = msg.len().min(MAX_MSG_LEN) as u8;
            entry.msg[..entry.len as usize].copy_from_slice(&msg[..entry.len as usize]);
        }

        self.write_idx.store(write.wrapping_add(1), Ordering::Release);
        true
    }

    /// Drain next log entry.
    ///
    /// Returns `None` if no entries available.
    #[inline]
    pub fn drain(&self) -> Option<LogEntry> {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);

        if read == write {
            return None;
        }

        let idx = (read as usize) & Self::MASK;

        // SAFETY: single consumer, slot published by the producer
        let entry = unsafe { (*self.entries.get())[idx] };

        self.read_idx.store(read.wrapping_add(1), Ordering::Release);
        Some(entry)
    }

    /// Get count of dropped messages.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Reset dropped counter (e.g., after reporting).
    #[inline]
    pub fn reset_dropped(&self) {
        self.dropped.store(0, Ordering::Relaxed);
    }

    /// Check if there are entries to drain.
    #[inline]
    pub fn has_entries(&self) -> bool {
        self.pending() != 0
    }

    /// Get number of entries waiting to be drained.
    #[inline]
    pub fn pending(&self) -> u32 {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);
        write.wrapping_sub(read)
    }
}

impl<const N: usize> Default for LogStream<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a message into a buffer, truncating at the buffer end.
///
/// Returns the number of bytes written.
#[inline]
pub fn format_to_buffer(buf: &mut [u8], args: fmt::Arguments<'_>) -> usize {
    struct BufWriter<'a> {
        buf: &'a mut [u8],
        pos: usize,
    }

    impl Write for BufWriter<'_> {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            let bytes = s.as_bytes();
            let remaining = self.buf.len() - self.pos;
            let to_write = bytes.len().min(remaining);
            self.buf[self.pos..self.pos + to_write].copy_from_slice(&bytes[..to_write]);
            self.pos += to_write;
            Ok(())
        }
    }

    let mut writer = BufWriter { buf, pos: 0 };
    let _ = fmt::write(&mut writer, args);
    writer.pos
}

/// Write one entry as `[timestamp_us] LEVEL: message\n`.
pub fn write_entry<W: Write + ?Sized>(entry: &LogEntry, out: &mut W) -> fmt::Result {
    writeln!(
        out,
        "[{:10}] {}: {}",
        entry.timestamp_us,
        entry.level.as_str(),
        entry.message()
    )
}

/// Print and remove every pending entry, then report drops.
///
/// Returns the number of entries printed.
pub fn drain_to<const N: usize, W: Write + ?Sized>(stream: &LogStream<N>, out: &mut W) -> usize {
    let mut count = 0;
    while let Some(entry) = stream.drain() {
        let _ = write_entry(&entry, out);
        count += 1;
    }

    let dropped = stream.dropped();
    if dropped > 0 {
        let _ = writeln!(out, "[WARN] Dropped: {}", dropped);
        stream.reset_dropped();
    }

    count
}

/// `log` backend that records into a [`LogStream`].
pub struct StreamLogger {
    stream: &'static LogStream,
    clock: fn() -> i64,
    level: log::LevelFilter,
}

impl StreamLogger {
    /// Logger stamping entries with `clock` (microseconds).
    pub const fn new(stream: &'static LogStream, clock: fn() -> i64) -> Self {
        Self {
            stream,
            clock,
            level: log::LevelFilter::Debug,
        }
    }

    /// Same logger with a different maximum level.
    pub const fn with_level(mut self, level: log::LevelFilter) -> Self {
        self.level = level;
        self
    }

    pub fn level(&self) -> log::LevelFilter {
        self.level
    }
}

impl log::Log for StreamLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut buf = [0u8; MAX_MSG_LEN];
        let len = format_to_buffer(&mut buf, *record.args());
        self.stream
            .push((self.clock)(), record.level().into(), &buf[..len]);
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;

    #[test]
    fn test_log_stream_basic() {
        let stream = LogStream::<16>::new();

        assert!(stream.push(1000, LogLevel::Info, b"test message"));
        assert!(stream.has_entries());
        assert_eq!(stream.pending(), 1);

        let entry = stream.drain().unwrap();
        assert_eq!(entry.timestamp_us, 1000);
        assert_eq!(entry.level, LogLevel::Info);
        assert_eq!(entry.message(), "test message");

        assert!(!stream.has_entries());
    }

    #[test]
    fn test_log_stream_full() {
        let stream = LogStream::<4>::new();

        assert!(stream.push(1, LogLevel::Info, b"1"));
        assert!(stream.push(2, LogLevel::Info, b"2"));
        assert!(stream.push(3, LogLevel::Info, b"3"));
        assert!(stream.push(4, LogLevel::Info, b"4"));

        // Should drop
        assert!(!stream.push(5, LogLevel::Info, b"5"));
        assert_eq!(stream.dropped(), 1);

        // Drain one, should be able to push again
        stream.drain();
        assert!(stream.push(6, LogLevel::Info, b"6"));
    }

    #[test]
    fn test_long_message_truncated() {
        let stream = LogStream::<4>::new();
        let long = [b'x'; MAX_MSG_LEN + 30];
        assert!(stream.push(0, LogLevel::Debug, &long));
        assert_eq!(stream.drain().unwrap().len as usize, MAX_MSG_LEN);
    }

    #[test]
    fn test_format_to_buffer() {
        let mut buf = [0u8; 32];
        let len = format_to_buffer(&mut buf, format_args!("Hello {}", 42));
        assert_eq!(&buf[..len], b"Hello 42");
    }

    #[test]
    fn test_format_to_buffer_truncates() {
        let mut buf = [0u8; 4];
        let len = format_to_buffer(&mut buf, format_args!("abcdefgh"));
        assert_eq!(&buf[..len], b"abcd");
    }

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Error < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Trace);
    }

    #[test]
    fn test_write_entry_format() {
        let mut entry = LogEntry {
            timestamp_us: 1234567,
            level: LogLevel::Info,
            ..LogEntry::default()
        };
        entry.msg[..11].copy_from_slice(b"Hello world");
        entry.len = 11;

        let mut s = String::new();
        write_entry(&entry, &mut s).unwrap();
        assert_eq!(s, "[   1234567] INFO: Hello world\n");
    }

    #[test]
    fn test_drain_reports_drops() {
        let stream = LogStream::<2>::new();
        stream.push(1, LogLevel::Warn, b"a");
        stream.push(2, LogLevel::Error, b"b");
        stream.push(3, LogLevel::Error, b"c");

        let mut s = String::new();
        assert_eq!(drain_to(&stream, &mut s), 2);
        assert!(s.contains("WARN: a"));
        assert!(s.contains("ERROR: b"));
        assert!(s.ends_with("[WARN] Dropped: 1\n"));
        assert_eq!(stream.dropped(), 0);
    }

    #[test]
    fn test_stream_logger_filters_and_records() {
        static STREAM: LogStream = LogStream::new();
        fn clock() -> i64 {
            42
        }
        let logger = StreamLogger::new(&STREAM, clock).with_level(log::LevelFilter::Info);

        logger.log(
            &log::Record::builder()
                .level(log::Level::Info)
                .args(format_args!("board {}", 3))
                .build(),
        );
        logger.log(
            &log::Record::builder()
                .level(log::Level::Debug)
                .args(format_args!("hidden"))
                .build(),
        );

        let entry = STREAM.drain().unwrap();
        assert_eq!(entry.timestamp_us, 42);
        assert_eq!(entry.level, LogLevel::Info);
        assert_eq!(entry.message(), "board 3");
        assert!(STREAM.drain().is_none());
    }
}
