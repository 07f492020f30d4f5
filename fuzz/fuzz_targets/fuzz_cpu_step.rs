//! Fuzz target for CPU execution.
//!
//! This target creates arbitrary register files and memory images, then runs
//! a bounded number of instructions to find panics in the execution loop.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use ls8::{ExecutionError, FlatMemory, Flags, RunOptions, CPU, MEMORY_SIZE};

/// Arbitrary CPU initial state for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    /// R0-R6
    registers: [u8; 7],
    /// R7
    sp: u8,
    /// Starting program counter
    pc: u8,
    flag_lt: bool,
    flag_gt: bool,
    flag_eq: bool,
}

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    memory: [u8; MEMORY_SIZE],
    max_steps: u8,
}

fuzz_target!(|input: FuzzInput| {
    let mut cpu = CPU::new(FlatMemory::new());
    if cpu.load(&input.memory, 0).is_err() {
        return;
    }

    for (index, &value) in input.cpu_state.registers.iter().enumerate() {
        let _ = cpu.set_register(index as u8, value);
    }
    cpu.set_sp(input.cpu_state.sp);
    cpu.set_pc(input.cpu_state.pc as u16);
    cpu.set_flags(Flags {
        lt: input.cpu_state.flag_lt,
        gt: input.cpu_state.flag_gt,
        eq: input.cpu_state.flag_eq,
    });
    cpu.set_output_callback(|_| {});

    let options = RunOptions {
        max_steps: Some(input.max_steps as u64),
        trace: false,
    };

    // Errors are expected; panics are bugs
    match cpu.run_with_options(&options) {
        Ok(steps) => assert!(cpu.is_halted() && steps <= input.max_steps as u64),
        Err(ExecutionError::IllegalInstruction { pc, .. }) => assert_eq!(pc, cpu.pc()),
        Err(_) => {}
    }

    assert!(cpu.steps() <= input.max_steps as u64);
    assert!(cpu.pc() as usize <= MEMORY_SIZE);
});
