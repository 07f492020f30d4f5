//! Tests for the CALL and RET instructions.
//!
//! Tests cover:
//! - Return address (PC+2) pushed on CALL
//! - RET resuming right after the CALL with SP restored
//! - Nested calls
//! - Stack bounds and return addresses past the end of memory

use ls8::{ExecutionError, FlatMemory, MemoryBus, CPU, STACK_TOP};
use std::cell::RefCell;
use std::rc::Rc;

/// Helper function to create a CPU with `program` at address 0
fn setup_cpu(program: &[u8]) -> CPU<FlatMemory> {
    let mut cpu = CPU::new(FlatMemory::new());
    cpu.load(program, 0).unwrap();
    cpu
}

#[test]
fn test_call_basic_operation() {
    let mut cpu = setup_cpu(&[]);
    cpu.memory_mut().write(0x10, 0x50).unwrap(); // CALL R1
    cpu.memory_mut().write(0x11, 0x01).unwrap();
    cpu.set_register(1, 0x40).unwrap();
    cpu.set_pc(0x10);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x40);
    assert_eq!(cpu.sp(), STACK_TOP - 1);
    assert_eq!(cpu.memory().read((STACK_TOP - 1) as u16), Ok(0x12));
}

#[test]
fn test_call_then_ret_returns_after_call() {
    let mut cpu = setup_cpu(&[]);
    cpu.memory_mut().write(0x10, 0x50).unwrap(); // CALL R1
    cpu.memory_mut().write(0x11, 0x01).unwrap();
    cpu.memory_mut().write(0x40, 0x11).unwrap(); // RET
    cpu.set_register(1, 0x40).unwrap();
    cpu.set_pc(0x10);
    let initial_sp = cpu.sp();

    cpu.step().unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x12);
    assert_eq!(cpu.sp(), initial_sp);
}

#[test]
fn test_subroutine_program() {
    // 00: LDI R1,11 ; 03: LDI R0,10 ; 06: CALL R1 ; 08: PRN R0 ; 0A: HLT
    // 0B: ADD R0,R0 ; 0E: RET
    let mut cpu = setup_cpu(&[
        0x82, 0x01, 0x0B, 0x82, 0x00, 0x0A, 0x50, 0x01, 0x47, 0x00, 0x01, 0xA0, 0x00,
        0x00, 0x11,
    ]);
    let output = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&output);
    cpu.set_output_callback(move |value| sink.borrow_mut().push(value));

    cpu.run().unwrap();

    assert_eq!(*output.borrow(), vec![20]);
    assert_eq!(cpu.sp(), STACK_TOP);
}

#[test]
fn test_nested_calls() {
    // 00: LDI R1,0x20 ; 03: LDI R2,0x30 ; 06: CALL R1 ; 08: HLT
    // 20: LDI R0,1 ; 23: CALL R2 ; 25: RET
    // 30: LDI R3,2 ; 33: RET
    let mut cpu = setup_cpu(&[0x82, 0x01, 0x20, 0x82, 0x02, 0x30, 0x50, 0x01, 0x01]);
    for (offset, byte) in [0x82, 0x00, 0x01, 0x50, 0x02, 0x11].iter().enumerate() {
        cpu.memory_mut().write(0x20 + offset as u16, *byte).unwrap();
    }
    for (offset, byte) in [0x82, 0x03, 0x02, 0x11].iter().enumerate() {
        cpu.memory_mut().write(0x30 + offset as u16, *byte).unwrap();
    }

    assert_eq!(cpu.run(), Ok(9));
    assert_eq!(cpu.pc(), 0x08);
    assert_eq!(cpu.register(0), Ok(1));
    assert_eq!(cpu.register(3), Ok(2));
    assert_eq!(cpu.sp(), STACK_TOP);
}

#[test]
fn test_ret_underflow() {
    let mut cpu = setup_cpu(&[0x11]);
    cpu.set_sp(0xFF);

    assert_eq!(cpu.step(), Err(ExecutionError::StackUnderflow { pc: 0 }));
    assert_eq!(cpu.pc(), 0);
}

#[test]
fn test_call_overflow() {
    let mut cpu = setup_cpu(&[0x50, 0x00]);
    cpu.set_sp(0x00);

    assert_eq!(cpu.step(), Err(ExecutionError::StackOverflow { pc: 0 }));
    assert_eq!(cpu.pc(), 0);
}

#[test]
fn test_call_return_address_past_end_of_memory() {
    let mut cpu = setup_cpu(&[]);
    cpu.memory_mut().write(0xFE, 0x50).unwrap(); // CALL R0
    cpu.memory_mut().write(0xFF, 0x00).unwrap();
    cpu.set_pc(0xFE);

    assert_eq!(cpu.step(), Err(ExecutionError::AddressOutOfRange(0x100)));
    assert_eq!(cpu.sp(), STACK_TOP, "Nothing pushed");
}
