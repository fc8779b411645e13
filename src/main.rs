//! rpi-console - Main entry point
//!
//! On the board (`target_os = "none"`):
//! 1. Park secondary cores, set up the stack, zero .bss
//! 2. Bring up the mini UART and the in-memory logger
//! 3. Ask the firmware for a framebuffer
//! 4. Red on black, banner, console loop
//!
//! On a hosted target the same console runs over stdin/stdout against the
//! simulated firmware, without a display.

#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(target_os = "none")]
mod kernel {
    use core::arch::global_asm;
    use core::fmt::Write;
    use core::panic::PanicInfo;

    use rpi_console::config::{ConsoleConfig, SCREEN_HEIGHT, SCREEN_WIDTH, VERSION};
    use rpi_console::console::{Color, Console, Dispatcher};
    use rpi_console::hal::{Framebuffer, GenericTimer, MiniUart, VideoCoreMailbox};
    use rpi_console::mailbox::{Mailbox, MailboxBuffer, Spin};
    use rpi_console::viewer::{FrameViewer, NullViewer};
    use rpi_console::{StreamLogger, CONSOLE_LOG_STREAM};

    // Core 0 runs the kernel, the others sleep forever.
    global_asm!(
        ".section .text.boot",
        ".global _start",
        "_start:",
        "    mrs     x1, mpidr_el1",
        "    and     x1, x1, #3",
        "    cbz     x1, 2f",
        "1:  wfe",
        "    b       1b",
        "2:  ldr     x1, =__boot_stack_top",
        "    mov     sp, x1",
        "    ldr     x1, =__bss_start",
        "    ldr     x2, =__bss_end",
        "3:  cmp     x1, x2",
        "    b.hs    4f",
        "    str     xzr, [x1], #8",
        "    b       3b",
        "4:  bl      kernel_main",
        "    b       1b",
    );

    /// The only property buffer. Reached through `&mut Mailbox` only.
    static MAILBOX_BUFFER: MailboxBuffer = MailboxBuffer::new();

    static LOGGER: StreamLogger = StreamLogger::new(&CONSOLE_LOG_STREAM, uptime_us);

    fn uptime_us() -> i64 {
        GenericTimer::uptime_us() as i64
    }

    #[no_mangle]
    pub extern "C" fn kernel_main() -> ! {
        // SAFETY: single core, nothing else drives the UART yet
        let mut uart = unsafe { MiniUart::new() };
        uart.init();

        // SAFETY: single execution context, no interrupts, and no log call
        // has happened yet
        unsafe {
            let _ = log::set_logger_racy(&LOGGER);
            log::set_max_level_racy(LOGGER.level());
        }
        log::info!("{} booting", VERSION);

        // SAFETY: the mailbox registers have no other owner
        let regs = unsafe { VideoCoreMailbox::new() };
        let mut mailbox = Mailbox::new(regs, Spin, &MAILBOX_BUFFER);

        let mut framebuffer = match Framebuffer::init(&mut mailbox, SCREEN_WIDTH, SCREEN_HEIGHT) {
            Ok(fb) => Some(fb),
            Err(e) => {
                log::warn!("{}", e);
                None
            }
        };
        let mut no_display = NullViewer;
        let viewer: &mut dyn FrameViewer = match framebuffer.as_mut() {
            Some(fb) => fb,
            None => &mut no_display,
        };

        let _ = uart.write_str(Color::RED.foreground());
        let _ = uart.write_str(Color::BLACK.background());

        let mut timer = GenericTimer;
        let mut console = Console::new(ConsoleConfig::new());
        console.print_banner(&mut uart);

        let mut dispatcher = Dispatcher::new(&mut mailbox, viewer, &mut timer, &CONSOLE_LOG_STREAM);
        console.run(&mut dispatcher, &mut uart)
    }

    #[panic_handler]
    fn panic(info: &PanicInfo<'_>) -> ! {
        // SAFETY: the console loop is abandoned, the UART is ours again
        let mut uart = unsafe { MiniUart::new() };
        let _ = writeln!(uart, "\n*** kernel panic: {}", info);
        loop {
            // SAFETY: wfe only waits for an event
            unsafe { core::arch::asm!("wfe", options(nomem, nostack)) };
        }
    }
}

#[cfg(not(target_os = "none"))]
mod host {
    use std::fmt;
    use std::io::{self, Read, Write};
    use std::sync::OnceLock;
    use std::time::{Duration, Instant};

    use rpi_console::console::{Console, Dispatcher, Terminal};
    use rpi_console::hal::Delay;
    use rpi_console::mailbox::{Bounded, Mailbox, MailboxBuffer, SimulatedFirmware};
    use rpi_console::viewer::NullViewer;
    use rpi_console::{StreamLogger, CONSOLE_LOG_STREAM};

    /// Polls before the simulated firmware counts as dead.
    const POLL_LIMIT: u32 = 10_000;

    static START: OnceLock<Instant> = OnceLock::new();
    static LOGGER: StreamLogger = StreamLogger::new(&CONSOLE_LOG_STREAM, uptime_us);

    fn uptime_us() -> i64 {
        START.get_or_init(Instant::now).elapsed().as_micros() as i64
    }

    /// stdin/stdout as the operator terminal.
    struct StdTerminal {
        stdin: io::Stdin,
        stdout: io::Stdout,
    }

    impl fmt::Write for StdTerminal {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            let mut out = self.stdout.lock();
            out.write_all(s.as_bytes()).map_err(|_| fmt::Error)?;
            out.flush().map_err(|_| fmt::Error)
        }
    }

    impl Terminal for StdTerminal {
        fn read_byte(&mut self) -> u8 {
            let mut byte = [0u8; 1];
            match self.stdin.lock().read(&mut byte) {
                Ok(1) if byte[0] == b'\r' => b'\n',
                Ok(1) => byte[0],
                // End of input ends the session
                _ => std::process::exit(0),
            }
        }

        // stdin has no portable non-blocking read; wait for the next byte
        fn poll_byte(&mut self) -> Option<u8> {
            Some(self.read_byte())
        }
    }

    struct StdDelay;

    impl Delay for StdDelay {
        fn now_us(&self) -> u64 {
            uptime_us() as u64
        }

        fn delay_us(&mut self, us: u64) {
            std::thread::sleep(Duration::from_micros(us));
        }
    }

    pub fn run() -> ! {
        START.get_or_init(Instant::now);
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LOGGER.level());
        }

        let buffer = MailboxBuffer::new();
        let mut mailbox = Mailbox::new(
            SimulatedFirmware::new(&buffer),
            Bounded::new(POLL_LIMIT),
            &buffer,
        );
        let mut viewer = NullViewer;
        let mut delay = StdDelay;
        let mut term = StdTerminal {
            stdin: io::stdin(),
            stdout: io::stdout(),
        };

        let mut console = Console::default();
        console.print_banner(&mut term);

        let mut dispatcher =
            Dispatcher::new(&mut mailbox, &mut viewer, &mut delay, &CONSOLE_LOG_STREAM);
        console.run(&mut dispatcher, &mut term)
    }
}

#[cfg(not(target_os = "none"))]
fn main() {
    host::run()
}
