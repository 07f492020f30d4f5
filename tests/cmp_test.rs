//! Comprehensive tests for the CMP (Compare) instruction.
//!
//! Tests cover:
//! - Exactly one of LT/GT/EQ set after every compare
//! - The most recent compare wins
//! - Boundary values
//! - Registers unchanged, PC advanced by 3

use ls8::{FlatMemory, MemoryBus, CPU};

/// Helper: CPU with `CMP R0,R1` at address 0
fn setup_cmp(a: u8, b: u8) -> CPU<FlatMemory> {
    let mut cpu = CPU::new(FlatMemory::new());
    cpu.load(&[0xA7, 0x00, 0x01], 0).unwrap();
    cpu.set_register(0, a).unwrap();
    cpu.set_register(1, b).unwrap();
    cpu
}

#[test]
fn test_cmp_equal() {
    let mut cpu = setup_cmp(42, 42);
    cpu.step().unwrap();

    let flags = cpu.flags();
    assert!(flags.eq);
    assert!(!flags.lt);
    assert!(!flags.gt);
    assert_eq!(flags.bits(), 0b001);
}

#[test]
fn test_cmp_greater() {
    let mut cpu = setup_cmp(200, 100);
    cpu.step().unwrap();

    assert_eq!(cpu.flags().bits(), 0b010);
}

#[test]
fn test_cmp_less() {
    let mut cpu = setup_cmp(100, 200);
    cpu.step().unwrap();

    assert_eq!(cpu.flags().bits(), 0b100);
}

#[test]
fn test_cmp_boundary_zero_vs_max() {
    let mut cpu = setup_cmp(0, 255);
    cpu.step().unwrap();
    assert_eq!(cpu.flags().bits(), 0b100);

    let mut cpu = setup_cmp(255, 0);
    cpu.step().unwrap();
    assert_eq!(cpu.flags().bits(), 0b010);
}

#[test]
fn test_cmp_last_compare_wins() {
    let mut cpu = CPU::new(FlatMemory::new());
    // CMP R0,R1 ; CMP R1,R0 ; CMP R0,R0
    cpu.load(&[0xA7, 0x00, 0x01, 0xA7, 0x01, 0x00, 0xA7, 0x00, 0x00], 0)
        .unwrap();
    cpu.set_register(0, 1).unwrap();
    cpu.set_register(1, 2).unwrap();

    cpu.step().unwrap();
    assert_eq!(cpu.flags().bits(), 0b100);

    cpu.step().unwrap();
    assert_eq!(cpu.flags().bits(), 0b010, "Previous LT must be cleared");

    cpu.step().unwrap();
    assert_eq!(cpu.flags().bits(), 0b001, "Previous GT must be cleared");
}

#[test]
fn test_cmp_leaves_registers_and_advances_pc() {
    let mut cpu = setup_cmp(7, 9);
    cpu.step().unwrap();

    assert_eq!(cpu.register(0), Ok(7));
    assert_eq!(cpu.register(1), Ok(9));
    assert_eq!(cpu.pc(), 3);
    assert_eq!(cpu.memory().read(0), Ok(0xA7));
}
