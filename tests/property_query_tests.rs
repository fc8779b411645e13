//! Named property queries over the simulated firmware

use rpi_console::hal::Framebuffer;
use rpi_console::mailbox::property::{Clock, MacFormat};
use rpi_console::mailbox::{
    Bounded, Mailbox, MailboxBuffer, MailboxError, PropertyQueries, SimulatedFirmware,
    RESPONSE_ERROR,
};

#[test]
fn test_board_revision_and_model() {
    let buffer = MailboxBuffer::new();
    let mut mbox = Mailbox::new(SimulatedFirmware::new(&buffer), Bounded::new(10), &buffer);

    let rev = mbox.board_revision().unwrap();
    assert_eq!(rev.0, 0x00a0_2082);
    assert_eq!(rev.model(), Some("rpi-3B BCM2837 1GiB Sony UK"));

    mbox.registers_mut().revision = 0x0090_0092;
    assert_eq!(
        mbox.board_revision().unwrap().model(),
        Some("rpi-Zero BCM2835 512MB Sony UK")
    );

    mbox.registers_mut().revision = 0x1234_5678;
    assert_eq!(mbox.board_revision().unwrap().model(), None);
}

#[test]
fn test_mac_address_groupings() {
    let buffer = MailboxBuffer::new();
    let mut mbox = Mailbox::new(SimulatedFirmware::new(&buffer), Bounded::new(10), &buffer);
    mbox.registers_mut().mac = [0xB8, 0x27, 0xEB, 0x0a, 0x1b, 0x2c];

    let mac = mbox.mac_address().unwrap();
    assert_eq!(mac.0, [0xB8, 0x27, 0xEB, 0x0a, 0x1b, 0x2c]);
    assert_eq!(mac.display(MacFormat::LowWord).to_string(), "0x0AEB27B8");
    assert_eq!(mac.display(MacFormat::HighWord).to_string(), "0x00002C1B");
    assert_eq!(mac.display(MacFormat::Colon).to_string(), "2C:1B:0A:EB:27:B8");
}

#[test]
fn test_clock_rates() {
    let buffer = MailboxBuffer::new();
    let mut mbox = Mailbox::new(SimulatedFirmware::new(&buffer), Bounded::new(10), &buffer);

    let uart = mbox.clock_rate(Clock::Uart).unwrap();
    assert_eq!((uart.id, uart.hz), (2, 48_000_000));

    let arm = mbox.clock_rate(Clock::Arm).unwrap();
    assert_eq!((arm.id, arm.hz), (3, 1_200_000_000));
}

#[test]
fn test_set_physical_size_returns_applied_size() {
    let buffer = MailboxBuffer::new();
    let mut mbox = Mailbox::new(SimulatedFirmware::new(&buffer), Bounded::new(10), &buffer);
    mbox.registers_mut().set_reply(&[800, 600]);

    assert_eq!(mbox.set_physical_size(1024, 768), Ok((800, 600)));
}

#[test]
fn test_queries_propagate_failure() {
    let buffer = MailboxBuffer::new();
    let mut mbox = Mailbox::new(SimulatedFirmware::new(&buffer), Bounded::new(10), &buffer);
    mbox.registers_mut().fail_with(RESPONSE_ERROR);

    assert_eq!(
        mbox.board_revision(),
        Err(MailboxError::ResponseCode(RESPONSE_ERROR))
    );
    assert!(mbox.mac_address().is_err());
    assert!(mbox.clock_rate(Clock::Arm).is_err());
}

#[test]
fn test_framebuffer_bring_up() {
    let buffer = MailboxBuffer::new();
    let mut mbox = Mailbox::new(SimulatedFirmware::new(&buffer), Bounded::new(10), &buffer);

    let fb = Framebuffer::init(&mut mbox, 1024, 720).unwrap();

    assert_eq!((fb.width(), fb.height()), (1024, 720));
    assert_eq!(mbox.registers().physical, (1024, 720));
    assert_eq!(mbox.registers().virtual_size, (1024, 720));
    assert_eq!(mbox.registers().depth, 32);
}

#[test]
fn test_allocate_buffer_saturates_huge_sizes() {
    let buffer = MailboxBuffer::new();
    let mut mbox = Mailbox::new(SimulatedFirmware::new(&buffer), Bounded::new(10), &buffer);

    mbox.set_virtual_size(100_000, 100_000).unwrap();
    let (_, size) = mbox.allocate_buffer(16).unwrap();
    assert_eq!(size, u32::MAX);

    mbox.set_depth(u32::MAX).unwrap();
    assert_eq!(mbox.pitch().unwrap(), u32::MAX / 8);
}
