//! Console error types

use crate::mailbox::MailboxError;

/// Console error with code and message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleError {
    /// E01: Unknown command
    UnknownCommand,
    /// E02: Edit buffer is full
    LineTooLong,
    /// E03: Hardware query failed
    Mailbox(MailboxError),
}

impl ConsoleError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "E01",
            Self::LineTooLong => "E02",
            Self::Mailbox(_) => "E03",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "unknown command",
            Self::LineTooLong => "input too long",
            Self::Mailbox(_) => "mailbox request failed",
        }
    }
}

impl From<MailboxError> for ConsoleError {
    fn from(e: MailboxError) -> Self {
        ConsoleError::Mailbox(e)
    }
}

impl core::fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Mailbox(e) => write!(f, "{}: {} ({})", self.code(), self.message(), e),
            _ => write!(f, "{}: {}", self.code(), self.message()),
        }
    }
}
