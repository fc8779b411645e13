//! Mailbox error types

/// Why a mailbox exchange did not produce a usable response.
///
/// Callers report every variant the same way; the distinction only shows up
/// in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailboxError {
    /// M01: Wait policy gave up while polling a status flag
    Timeout,
    /// M02: Reply on our channel carried a different buffer address
    AddressMismatch { sent: u32, received: u32 },
    /// M03: Buffer response code was not "success"
    ResponseCode(u32),
    /// M04: Request does not fit in the shared buffer
    Overflow { words: usize, capacity: usize },
    /// M05: Byte length is not a whole number of words
    Misaligned(usize),
    /// M06: Request payload length does not match the tag table
    RequestLength { expected: usize, actual: usize },
}

impl MailboxError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Timeout => "M01",
            Self::AddressMismatch { .. } => "M02",
            Self::ResponseCode(_) => "M03",
            Self::Overflow { .. } => "M04",
            Self::Misaligned(_) => "M05",
            Self::RequestLength { .. } => "M06",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::Timeout => "device not responding",
            Self::AddressMismatch { .. } => "response address mismatch",
            Self::ResponseCode(_) => "request not served",
            Self::Overflow { .. } => "request too large",
            Self::Misaligned(_) => "length not word aligned",
            Self::RequestLength { .. } => "wrong request length for tag",
        }
    }
}

impl core::fmt::Display for MailboxError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())?;
        match *self {
            Self::AddressMismatch { sent, received } => {
                write!(f, " (sent {:#010x}, got {:#010x})", sent, received)
            }
            Self::ResponseCode(code) => write!(f, " (code {:#010x})", code),
            Self::Overflow { words, capacity } => write!(f, " ({} > {} words)", words, capacity),
            Self::Misaligned(len) => write!(f, " ({} bytes)", len),
            Self::RequestLength { expected, actual } => {
                write!(f, " (expected {} words, got {})", expected, actual)
            }
            Self::Timeout => Ok(()),
        }
    }
}
