//! CPU initialization tests
//!
//! Verifies that the CPU starts in the LS-8 power-on state and that
//! independent instances do not share state.

use ls8::{FlatMemory, MemoryBus, CPU, NUM_REGISTERS, SP_REGISTER, STACK_TOP};

#[test]
fn test_cpu_power_on_values() {
    let cpu = CPU::new(FlatMemory::new());

    assert_eq!(cpu.pc(), 0x00, "PC should start at address 0");
    for reg in 0..SP_REGISTER {
        assert_eq!(cpu.register(reg), Ok(0), "R{} should start at 0", reg);
    }
    assert_eq!(cpu.sp(), 0xF4, "Stack pointer should start at 0xF4");
    assert_eq!(cpu.register(SP_REGISTER), Ok(STACK_TOP));

    let flags = cpu.flags();
    assert!(!flags.lt && !flags.gt && !flags.eq, "Flags should start clear");

    assert_eq!(cpu.steps(), 0);
    assert!(!cpu.is_halted());
}

#[test]
fn test_memory_starts_zeroed() {
    let cpu = CPU::new(FlatMemory::new());

    for addr in 0..=0xFFu16 {
        assert_eq!(cpu.memory().read(addr), Ok(0), "0x{:02X} should be 0", addr);
    }
}

#[test]
fn test_register_count() {
    let cpu = CPU::new(FlatMemory::new());
    assert_eq!(cpu.registers().snapshot().len(), NUM_REGISTERS);
    assert!(cpu.register(NUM_REGISTERS as u8).is_err());
}

#[test]
fn test_instances_are_isolated() {
    let mut first = CPU::new(FlatMemory::new());
    let second = CPU::new(FlatMemory::new());

    first.load(&[0x82, 0x00, 0x63, 0x01], 0).unwrap();
    first.run().unwrap();

    assert_eq!(first.register(0), Ok(0x63));
    assert_eq!(second.register(0), Ok(0));
    assert_eq!(second.memory().read(0), Ok(0));
}
