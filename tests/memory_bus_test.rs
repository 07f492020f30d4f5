//! Memory bus trait tests
//!
//! Verifies the flat memory implementation and that the CPU works through
//! any `MemoryBus`, not just `FlatMemory`.

use ls8::{ExecutionError, FlatMemory, MemoryBus, CPU, MEMORY_SIZE, STACK_TOP};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_flat_memory_initialization() {
    let memory = FlatMemory::new();

    assert_eq!(memory.size(), MEMORY_SIZE);
    for addr in [0x00, 0x42, 0xF4, 0xFF].iter() {
        assert_eq!(
            memory.read(*addr),
            Ok(0x00),
            "Memory at 0x{:02X} should be initialized to 0",
            addr
        );
    }
}

#[test]
fn test_flat_memory_read_write_round_trip() {
    let mut memory = FlatMemory::new();

    let test_data = [(0x00, 0x01), (0x7F, 0xFF), (0xF3, 0x42), (0xFF, 0xCD)];

    for &(addr, value) in &test_data {
        memory.write(addr, value).unwrap();
        assert_eq!(
            memory.read(addr),
            Ok(value),
            "Memory at 0x{:02X} should contain 0x{:02X}",
            addr,
            value
        );
    }
}

#[test]
fn test_flat_memory_bounds() {
    let mut memory = FlatMemory::new();

    assert_eq!(memory.read(0x100), Err(ExecutionError::AddressOutOfRange(0x100)));
    assert_eq!(
        memory.write(0xFFFF, 1),
        Err(ExecutionError::AddressOutOfRange(0xFFFF))
    );
    assert_eq!(memory.peek(0x100), 0, "peek never fails");
}

#[test]
fn test_independent_cpus_do_not_share_memory() {
    let mut first = CPU::new(FlatMemory::new());
    let second = CPU::new(FlatMemory::new());

    first.memory_mut().write(0x10, 0xAB).unwrap();

    assert_eq!(first.memory().read(0x10), Ok(0xAB));
    assert_eq!(second.memory().read(0x10), Ok(0x00));
}

// ========== Custom MemoryBus ==========

/// Memory that shares its write log with the test
struct RecordingMemory {
    cells: [u8; MEMORY_SIZE],
    writes: Rc<RefCell<Vec<(u16, u8)>>>,
}

impl MemoryBus for RecordingMemory {
    fn size(&self) -> usize {
        self.cells.len()
    }

    fn read(&self, addr: u16) -> Result<u8, ExecutionError> {
        self.cells
            .get(addr as usize)
            .copied()
            .ok_or(ExecutionError::AddressOutOfRange(addr))
    }

    fn write(&mut self, addr: u16, value: u8) -> Result<(), ExecutionError> {
        let cell = self
            .cells
            .get_mut(addr as usize)
            .ok_or(ExecutionError::AddressOutOfRange(addr))?;
        *cell = value;
        self.writes.borrow_mut().push((addr, value));
        Ok(())
    }
}

#[test]
fn test_cpu_runs_on_custom_memory() {
    let writes = Rc::new(RefCell::new(Vec::new()));
    let memory = RecordingMemory {
        cells: [0; MEMORY_SIZE],
        writes: Rc::clone(&writes),
    };
    let mut cpu = CPU::new(memory);

    // LDI R0,7 ; PUSH R0 ; HLT
    cpu.load(&[0x82, 0x00, 0x07, 0x45, 0x00, 0x01], 0).unwrap();
    writes.borrow_mut().clear();

    cpu.run().unwrap();

    assert_eq!(*writes.borrow(), vec![(0xF3, 0x07)]);
}

/// Memory smaller than the LS-8 address space
struct TinyMemory {
    cells: [u8; 8],
}

impl MemoryBus for TinyMemory {
    fn size(&self) -> usize {
        self.cells.len()
    }

    fn read(&self, addr: u16) -> Result<u8, ExecutionError> {
        self.cells
            .get(addr as usize)
            .copied()
            .ok_or(ExecutionError::AddressOutOfRange(addr))
    }

    fn write(&mut self, addr: u16, value: u8) -> Result<(), ExecutionError> {
        let cell = self
            .cells
            .get_mut(addr as usize)
            .ok_or(ExecutionError::AddressOutOfRange(addr))?;
        *cell = value;
        Ok(())
    }
}

#[test]
fn test_load_respects_bus_size() {
    let mut cpu = CPU::new(TinyMemory { cells: [0; 8] });

    assert_eq!(
        cpu.load(&[0; 9], 0),
        Err(ExecutionError::AddressOutOfRange(8))
    );
}

#[test]
fn test_stack_write_outside_small_bus() {
    let mut cpu = CPU::new(TinyMemory { cells: [0; 8] });
    cpu.load(&[0x45, 0x00], 0).unwrap(); // PUSH R0 with SP at 0xF4

    assert_eq!(cpu.step(), Err(ExecutionError::AddressOutOfRange(0xF3)));
    assert_eq!(cpu.sp(), STACK_TOP, "Failed push must not move SP");
    assert_eq!(cpu.pc(), 0);
}

#[test]
fn test_call_write_outside_small_bus_keeps_sp() {
    let mut cpu = CPU::new(TinyMemory { cells: [0; 8] });
    cpu.load(&[0x50, 0x01], 0).unwrap(); // CALL R1 with SP at 0xF4
    cpu.set_register(1, 0x05).unwrap();

    assert_eq!(cpu.step(), Err(ExecutionError::AddressOutOfRange(0xF3)));
    assert_eq!(cpu.sp(), STACK_TOP);
    assert_eq!(cpu.pc(), 0, "Failed call must not jump");
}
