//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the LS-8 processor state
//! and the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: R0-R7, with R7 serving as the stack pointer
//! - **Program counter** (PC): address of the next instruction
//! - **Flags**: LT, GT, EQ, written by CMP
//! - **Halted flag**: set by HLT, ends `run()`
//! - **Step counter**: number of instructions executed
//!
//! ## Execution Model
//!
//! The CPU executes instructions via:
//! - `step()`: Execute one instruction
//! - `run()`: Execute until HLT
//! - `run_with_options()`: Execute until HLT with a step bound and tracing
//!
//! Every instruction handler advances PC by its own width or assigns it
//! outright; the loop never advances PC on its own.

use crate::instructions::{alu, branches, control, io, load_store, stack};
use crate::{
    decode, AluOp, ExecutionError, Flags, Instruction, MemoryBus, OpcodeMetadata,
    RegisterFile, TraceSnapshot,
};

/// Options controlling a `run_with_options()` call.
///
/// # Examples
///
/// ```
/// use ls8::RunOptions;
///
/// let options = RunOptions {
///     max_steps: Some(10_000),
///     ..RunOptions::default()
/// };
/// assert!(!options.trace);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Fail with `StepLimitExceeded` after this many instructions without HLT
    pub max_steps: Option<u64>,

    /// Log a trace line for every fetch through the `log` facade
    pub trace: bool,
}

/// LS-8 CPU state and execution context.
///
/// The CPU is generic over the memory implementation via the `MemoryBus`
/// trait. Each instance owns its memory, so independent CPUs never share
/// state.
///
/// # Examples
///
/// ```
/// use ls8::{CPU, FlatMemory, STACK_TOP};
///
/// let cpu = CPU::new(FlatMemory::new());
///
/// assert_eq!(cpu.pc(), 0x00);
/// assert_eq!(cpu.sp(), STACK_TOP);
/// assert_eq!(cpu.flags().bits(), 0);
/// assert!(!cpu.is_halted());
/// ```
pub struct CPU<M: MemoryBus> {
    /// General-purpose registers R0-R7
    pub(crate) registers: RegisterFile,

    /// Condition flags from the most recent CMP
    pub(crate) flags: Flags,

    /// Program counter (address of next instruction)
    pub(crate) pc: u16,

    /// Set by HLT
    pub(crate) halted: bool,

    /// Total instructions executed
    pub(crate) steps: u64,

    /// Memory bus implementation
    pub(crate) memory: M,

    /// PRN sink
    on_output: Option<Box<dyn FnMut(u8)>>,

    /// Invoked once per fetch
    on_trace: Option<Box<dyn FnMut(&TraceSnapshot)>>,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a new CPU with the given memory bus.
    ///
    /// The CPU starts in the power-on state:
    /// - PC is 0x00
    /// - R0-R6 are zero, R7 (SP) is `STACK_TOP` (0xF4)
    /// - All flags are clear
    ///
    /// Memory contents are left as provided.
    pub fn new(memory: M) -> Self {
        Self {
            registers: RegisterFile::new(),
            flags: Flags::new(),
            pc: 0x00,
            halted: false,
            steps: 0,
            memory,
            on_output: None,
            on_trace: None,
        }
    }

    /// Returns registers, flags, PC and the halted state to power-on values.
    ///
    /// Memory and callbacks are kept.
    pub fn reset(&mut self) {
        self.registers = RegisterFile::new();
        self.flags = Flags::new();
        self.pc = 0x00;
        self.halted = false;
        self.steps = 0;
    }

    /// Copies a program image into memory starting at `base`.
    ///
    /// Nothing is written if the image does not fit.
    ///
    /// # Errors
    ///
    /// `ExecutionError::AddressOutOfRange` with the first address past the
    /// end of memory the image would have touched.
    ///
    /// # Examples
    ///
    /// ```
    /// use ls8::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut cpu = CPU::new(FlatMemory::new());
    /// cpu.load(&[0x82, 0x00, 0x2A], 0x10).unwrap();
    /// assert_eq!(cpu.memory().read(0x12).unwrap(), 0x2A);
    ///
    /// assert!(cpu.load(&[0; 4], 0xFE).is_err());
    /// ```
    pub fn load(&mut self, program: &[u8], base: u16) -> Result<(), ExecutionError> {
        let end = base as usize + program.len();
        if end > self.memory.size() {
            let first_bad = self.memory.size().max(base as usize);
            return Err(ExecutionError::AddressOutOfRange(
                u16::try_from(first_bad).unwrap_or(u16::MAX),
            ));
        }

        for (offset, &byte) in program.iter().enumerate() {
            self.memory.write(base + offset as u16, byte)?;
        }

        log::debug!(
            "loaded {} bytes at 0x{:02X}-0x{:02X}",
            program.len(),
            base,
            end.saturating_sub(1)
        );
        Ok(())
    }

    /// Executes one instruction and advances the CPU state.
    ///
    /// Performs the fetch-decode-execute cycle:
    /// 1. Hand a trace snapshot to the trace callback, if set
    /// 2. Fetch the opcode byte at PC
    /// 3. Look up the instruction in the opcode table
    /// 4. Run its handler, which reads its operands and moves PC
    ///
    /// Stepping a halted CPU does nothing.
    ///
    /// # Errors
    ///
    /// - `IllegalInstruction` if the byte at PC is not an instruction; PC is
    ///   left pointing at it
    /// - `RegisterOutOfRange`, `AddressOutOfRange`, `StackOverflow` or
    ///   `StackUnderflow` from the instruction itself
    ///
    /// # Examples
    ///
    /// ```
    /// use ls8::{CPU, ExecutionError, FlatMemory};
    ///
    /// let mut cpu = CPU::new(FlatMemory::new());
    /// cpu.load(&[0x82, 0x02, 0x07, 0xFF], 0).unwrap(); // LDI R2,7 then garbage
    ///
    /// cpu.step().unwrap();
    /// assert_eq!(cpu.register(2).unwrap(), 7);
    /// assert_eq!(cpu.pc(), 3);
    ///
    /// assert_eq!(
    ///     cpu.step(),
    ///     Err(ExecutionError::IllegalInstruction { opcode: 0xFF, pc: 3 })
    /// );
    /// assert_eq!(cpu.pc(), 3);
    /// ```
    pub fn step(&mut self) -> Result<(), ExecutionError> {
        if self.halted {
            return Ok(());
        }

        if self.on_trace.is_some() {
            let snapshot = self.snapshot();
            if let Some(callback) = self.on_trace.as_mut() {
                callback(&snapshot);
            }
        }

        // Fetch
        let opcode = self.memory.read(self.pc)?;

        // Decode
        let metadata = decode(opcode).ok_or(ExecutionError::IllegalInstruction {
            opcode,
            pc: self.pc,
        })?;

        // Execute
        self.execute(metadata)?;
        self.steps += 1;

        Ok(())
    }

    fn execute(&mut self, metadata: &OpcodeMetadata) -> Result<(), ExecutionError> {
        match metadata.instruction {
            Instruction::Ldi => load_store::execute_ldi(self, metadata),
            Instruction::Prn => io::execute_prn(self, metadata),
            Instruction::Hlt => control::execute_hlt(self, metadata),
            Instruction::Push => stack::execute_push(self, metadata),
            Instruction::Pop => stack::execute_pop(self, metadata),
            Instruction::Call => control::execute_call(self, metadata),
            Instruction::Ret => control::execute_ret(self, metadata),
            Instruction::Jmp => control::execute_jmp(self, metadata),
            Instruction::Jeq => branches::execute_jeq(self, metadata),
            Instruction::Jne => branches::execute_jne(self, metadata),
            Instruction::Jgt => branches::execute_jgt(self, metadata),
            Instruction::Jlt => branches::execute_jlt(self, metadata),
            Instruction::Add
            | Instruction::Mul
            | Instruction::And
            | Instruction::Or
            | Instruction::Xor
            | Instruction::Not
            | Instruction::Cmp => {
                let op = metadata.instruction.alu_op().ok_or_else(|| {
                    ExecutionError::UnsupportedOperation(metadata.mnemonic.to_string())
                })?;
                alu::execute_alu_instruction(self, metadata, op)
            }
        }
    }

    /// Runs until HLT.
    ///
    /// Returns the number of instructions executed, including the HLT.
    pub fn run(&mut self) -> Result<u64, ExecutionError> {
        self.run_with_options(&RunOptions::default())
    }

    /// Runs until HLT, honoring `options`.
    ///
    /// The halted state is cleared first, so a CPU that stopped on HLT runs
    /// from its current PC again.
    ///
    /// # Errors
    ///
    /// Any error from `step()`, or `StepLimitExceeded` when
    /// `options.max_steps` instructions ran without reaching HLT.
    ///
    /// # Examples
    ///
    /// ```
    /// use ls8::{CPU, ExecutionError, FlatMemory, RunOptions};
    ///
    /// let mut cpu = CPU::new(FlatMemory::new());
    /// cpu.load(&[0x82, 0x00, 0x00, 0x54, 0x00], 0).unwrap(); // LDI R0,0; JMP R0
    ///
    /// let options = RunOptions { max_steps: Some(100), trace: false };
    /// assert_eq!(
    ///     cpu.run_with_options(&options),
    ///     Err(ExecutionError::StepLimitExceeded(100))
    /// );
    /// ```
    pub fn run_with_options(&mut self, options: &RunOptions) -> Result<u64, ExecutionError> {
        self.halted = false;
        let start_steps = self.steps;

        while !self.halted {
            let executed = self.steps - start_steps;
            if let Some(limit) = options.max_steps {
                if executed >= limit {
                    log::warn!("no HLT after {} steps, stopping at PC 0x{:02X}", limit, self.pc);
                    return Err(ExecutionError::StepLimitExceeded(limit));
                }
            }

            if options.trace {
                log::trace!("{}", self.snapshot());
            }

            if let Err(e) = self.step() {
                log::warn!("execution stopped: {}", self.fault_report(&e));
                return Err(e);
            }
        }

        Ok(self.steps - start_steps)
    }

    /// Runs a single ALU operation on registers `reg_a` and `reg_b`.
    ///
    /// The result is written back to `reg_a` (or to the flags for CMP) and PC
    /// advances by the operation's width. `reg_b` is not read by NOT.
    ///
    /// # Examples
    ///
    /// ```
    /// use ls8::{AluOp, CPU, FlatMemory};
    ///
    /// let mut cpu = CPU::new(FlatMemory::new());
    /// cpu.set_register(0, 200).unwrap();
    /// cpu.set_register(1, 100).unwrap();
    ///
    /// cpu.alu(AluOp::Add, 0, 1).unwrap();
    /// assert_eq!(cpu.register(0).unwrap(), 44); // wraps at 8 bits
    /// assert_eq!(cpu.pc(), 3);
    /// ```
    pub fn alu(&mut self, op: AluOp, reg_a: u8, reg_b: u8) -> Result<(), ExecutionError> {
        alu::execute_alu(self, op, reg_a, reg_b)
    }

    /// Describes `error` together with the instruction at PC.
    ///
    /// Faulting instructions leave PC on themselves, so after a failed
    /// `step()` or `run()` this names the instruction that failed.
    ///
    /// # Examples
    ///
    /// ```
    /// use ls8::{CPU, FlatMemory};
    ///
    /// let mut cpu = CPU::new(FlatMemory::new());
    /// cpu.load(&[0x82, 0x00, 0x01, 0x82, 0x09, 0x05, 0x01], 0).unwrap(); // LDI R9,5
    ///
    /// let err = cpu.run().unwrap_err();
    /// assert_eq!(
    ///     cpu.fault_report(&err),
    ///     "at address 0x03 (LDI): register index 9 is out of range (R0-R7)"
    /// );
    /// ```
    pub fn fault_report(&self, error: &ExecutionError) -> String {
        let opcode = self.memory.peek(self.pc);
        match decode(opcode) {
            Some(metadata) => format!(
                "at address 0x{:02X} ({}): {}",
                self.pc, metadata.mnemonic, error
            ),
            None => format!("at address 0x{:02X} (0x{:02X}): {}", self.pc, opcode, error),
        }
    }

    /// Installs the sink PRN delivers register values to.
    ///
    /// Without a sink, PRN prints the decimal value to stdout.
    pub fn set_output_callback<F>(&mut self, callback: F)
    where
        F: FnMut(u8) + 'static,
    {
        self.on_output = Some(Box::new(callback));
    }

    /// Installs a callback invoked with a `TraceSnapshot` before every
    /// instruction fetch.
    pub fn set_trace_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&TraceSnapshot) + 'static,
    {
        self.on_trace = Some(Box::new(callback));
    }

    /// Removes the trace callback.
    pub fn clear_trace_callback(&mut self) {
        self.on_trace = None;
    }

    pub(crate) fn emit_output(&mut self, value: u8) {
        match self.on_output.as_mut() {
            Some(callback) => callback(value),
            None => println!("{}", value),
        }
    }

    /// Captures the state the next fetch will see.
    pub fn snapshot(&self) -> TraceSnapshot {
        TraceSnapshot {
            pc: self.pc,
            bytes: [
                self.memory.peek(self.pc),
                self.memory.peek(self.pc.wrapping_add(1)),
                self.memory.peek(self.pc.wrapping_add(2)),
            ],
            registers: self.registers.snapshot(),
            flags: self.flags.bits(),
        }
    }

    // ========== Operand Helpers ==========

    /// Reads the first operand byte (PC+1).
    pub(crate) fn operand_a(&self) -> Result<u8, ExecutionError> {
        self.memory.read(self.pc.wrapping_add(1))
    }

    /// Reads the second operand byte (PC+2).
    pub(crate) fn operand_b(&self) -> Result<u8, ExecutionError> {
        self.memory.read(self.pc.wrapping_add(2))
    }

    /// Moves PC past the current instruction.
    pub(crate) fn advance_pc(&mut self, metadata: &OpcodeMetadata) {
        self.pc = self.pc.wrapping_add(metadata.size_bytes as u16);
    }

    // ========== State Getters ==========

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the value of register `index`.
    pub fn register(&self, index: u8) -> Result<u8, ExecutionError> {
        self.registers.get(index)
    }

    /// Returns the register file.
    pub fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    /// Returns the stack pointer (R7).
    pub fn sp(&self) -> u8 {
        self.registers.sp()
    }

    /// Returns the condition flags.
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Returns true once HLT has executed.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Returns the total number of instructions executed.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Returns a shared reference to memory.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Returns a mutable reference to memory.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    // ========== State Setters ==========

    /// Sets the program counter.
    pub fn set_pc(&mut self, pc: u16) {
        self.pc = pc;
    }

    /// Sets register `index`.
    pub fn set_register(&mut self, index: u8, value: u8) -> Result<(), ExecutionError> {
        self.registers.set(index, value)
    }

    /// Sets the stack pointer (R7).
    pub fn set_sp(&mut self, value: u8) {
        self.registers.set_sp(value);
    }

    /// Replaces the condition flags.
    pub fn set_flags(&mut self, flags: Flags) {
        self.flags = flags;
    }
}
