//! WASM API for the LS-8 emulator.
//!
//! Provides JavaScript-callable interfaces for CPU control, state inspection
//! and disassembly.

use crate::{disassemble, format_instruction, parse_program, FlatMemory, MemoryBus, RunOptions, CPU};
use wasm_bindgen::prelude::*;

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

impl<E: std::error::Error> From<E> for JsError {
    fn from(err: E) -> Self {
        JsError::new(&err.to_string())
    }
}

/// Result of disassembly operation
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct DisassemblyLine {
    address: u16,
    bytes: Vec<u8>,
    text: String,
}

#[wasm_bindgen]
impl DisassemblyLine {
    #[wasm_bindgen(getter)]
    pub fn address(&self) -> u16 {
        self.address
    }

    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.text.clone()
    }
}

/// Main emulator interface for JavaScript
#[wasm_bindgen]
pub struct Ls8Emulator {
    cpu: CPU<FlatMemory>,
}

#[wasm_bindgen]
impl Ls8Emulator {
    /// Create a new LS-8 emulator; `on_output` receives every PRN value
    #[wasm_bindgen(constructor)]
    pub fn new(on_output: js_sys::Function) -> Self {
        let mut cpu = CPU::new(FlatMemory::new());
        cpu.set_output_callback(move |value| {
            let _ = on_output.call1(&JsValue::NULL, &JsValue::from(value));
        });

        Ls8Emulator { cpu }
    }

    /// Parse LS-8 program text, load it at address 0 and reset the CPU
    pub fn load_program(&mut self, source: &str) -> Result<(), JsError> {
        let program = parse_program(source)?;
        self.load_bytes(&program)
    }

    /// Load raw machine code at address 0 and reset the CPU
    pub fn load_bytes(&mut self, program: &[u8]) -> Result<(), JsError> {
        *self.cpu.memory_mut() = FlatMemory::new();
        self.cpu.load(program, 0)?;
        self.cpu.reset();
        Ok(())
    }

    /// Execute a single instruction
    pub fn step(&mut self) -> Result<(), JsError> {
        self.cpu
            .step()
            .map_err(|e| JsError::new(&self.cpu.fault_report(&e)))
    }

    /// Run until HLT or `max_steps` instructions; returns steps executed
    pub fn run(&mut self, max_steps: u32) -> Result<u32, JsError> {
        let options = RunOptions {
            max_steps: Some(max_steps as u64),
            trace: false,
        };
        let steps = self
            .cpu
            .run_with_options(&options)
            .map_err(|e| JsError::new(&self.cpu.fault_report(&e)))?;
        Ok(steps as u32)
    }

    /// Reset registers, flags and PC; memory is kept
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.cpu.pc()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u8 {
        self.cpu.sp()
    }

    #[wasm_bindgen(getter)]
    pub fn halted(&self) -> bool {
        self.cpu.is_halted()
    }

    #[wasm_bindgen(getter)]
    pub fn steps(&self) -> f64 {
        self.cpu.steps() as f64 // Convert u64 to f64 for JavaScript
    }

    /// Packed `FL` register (`00000LGE`)
    #[wasm_bindgen(getter)]
    pub fn flags(&self) -> u8 {
        self.cpu.flags().bits()
    }

    /// All eight registers
    pub fn registers(&self) -> Vec<u8> {
        self.cpu.registers().snapshot().to_vec()
    }

    /// All 256 bytes of memory
    pub fn memory(&self) -> Vec<u8> {
        self.cpu.memory().as_slice().to_vec()
    }

    /// Write a single byte to memory
    pub fn write_memory(&mut self, addr: u16, value: u8) -> Result<(), JsError> {
        self.cpu.memory_mut().write(addr, value)?;
        Ok(())
    }

    /// Disassemble memory starting at an address
    pub fn disassemble(&self, start_addr: u8, num_instructions: u32) -> Vec<JsValue> {
        let bytes = &self.cpu.memory().as_slice()[start_addr as usize..];

        disassemble(bytes, start_addr as u16)
            .iter()
            .take(num_instructions as usize)
            .map(|instr| {
                let mut raw = vec![instr.opcode];
                raw.extend_from_slice(&instr.operands);
                JsValue::from(DisassemblyLine {
                    address: instr.address,
                    bytes: raw,
                    text: format_instruction(instr),
                })
            })
            .collect()
    }
}
