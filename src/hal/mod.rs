//! Hardware Abstraction Layer for the Raspberry Pi.
//!
//! Thin wrappers around BCM283x/BCM2711 peripherals.
//! Protocol and editing logic stay in core modules, HAL is just I/O.

pub mod framebuffer;
pub mod gpio;
pub mod mailbox;
pub mod mmio;
pub mod timer;
pub mod uart;

pub use framebuffer::{Framebuffer, FramebufferError};
pub use mailbox::VideoCoreMailbox;
pub use timer::Delay;
#[cfg(target_arch = "aarch64")]
pub use timer::GenericTimer;
pub use uart::MiniUart;
