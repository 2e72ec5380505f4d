/*!
cpu::mod - Public facade for the 6502 CPU core.

```text
    state.rs        - Register file, flag masks, vector addresses.
    regs.rs         - `CpuRegs`, the register API handlers are generic over.
    addressing.rs   - Operand fetch and effective address helpers.
    table.rs        - Closed `Operation` / `Mode` enums and the 256-entry table.
    execute.rs      - Instruction semantic helpers (ALU, stack, RMW, branch).
    dispatch/       - One-step orchestrator, family handlers, interrupt entry.
    core/           - `Cpu` facade.
```

Feature flags:
    trace           - Per-instruction `log::trace!` line from `Cpu::step`.

Usage:
```rust
use mos_console::{Bus, Profile};
use mos_console::cpu::{Cpu, Interrupt};

let mut bus = Bus::new(Profile::Nes);
let mut cpu = Cpu::new();
cpu.interrupt(&mut bus, Interrupt::Reset);
cpu.step(&mut bus);
```
*/

pub mod addressing;
pub mod core;
pub mod dispatch;
pub mod execute;
pub mod regs;
pub mod state;
pub mod table;

pub use crate::cpu::core::Cpu;
pub use crate::cpu::dispatch::{Interrupt, StepOutcome};
pub use crate::cpu::regs::CpuRegs;
pub use crate::cpu::state::{
    BREAK, CARRY, CpuState, DECIMAL, IRQ_DISABLE, NEGATIVE, OVERFLOW, UNUSED, ZERO,
};
pub use crate::cpu::table::{Descriptor, Instruction, Mode, OPCODES, Operation};
