use mos_console::{Machine, MachineConfig, MapperKind, Profile};

const IDLE_LOOP: u16 = 0x800C;

fn build_test_image() -> Vec<u8> {
    // NROM-128: 16KB PRG mirrored at $8000-$BFFF and $C000-$FFFF
    let mut prg = vec![0u8; 16 * 1024];

    // Program at $8000 (offset 0x0000 in PRG)
    let program: &[u8] = &[
        0xA9, 0x10, // LDA #$10
        0x69, 0x05, // ADC #$05 => A = 0x15
        0x8D, 0x00, 0x02, // STA $0200
        0xE8, // INX
        0xD0, 0xFD, // BNE -3 -> loop until X wraps to 0
        0x00, 0xFF, // BRK (+ padding byte)
        0x4C, 0x0C, 0x80, // JMP $800C (BRK handler spins here)
    ];
    prg[..program.len()].copy_from_slice(program);

    // Vectors at the top of the 16KB bank: NMI, RESET, IRQ/BRK
    let nmi: u16 = IDLE_LOOP;
    let reset: u16 = 0x8000;
    let irq: u16 = IDLE_LOOP;
    prg[0x3FFA..0x3FFC].copy_from_slice(&nmi.to_le_bytes());
    prg[0x3FFC..0x3FFE].copy_from_slice(&reset.to_le_bytes());
    prg[0x3FFE..0x4000].copy_from_slice(&irq.to_le_bytes());
    prg
}

fn main() {
    let config = MachineConfig::new(Profile::Nes).with_mapper(MapperKind::Nrom);
    let mut machine =
        Machine::with_rom(config, &build_test_image()).expect("failed to build machine");
    machine.power_on();

    // Run until the BRK handler is reached (with a safety cap)
    let max_instr: usize = 1_000_000;
    let mut instr_count: usize = 0;
    while machine.cpu().pc() != IDLE_LOOP && instr_count < max_instr {
        machine.step();
        instr_count += 1;
    }

    // Inspect state
    let m0200 = machine.bus_mut().read(0x0200);
    let cpu = machine.cpu();
    println!("instructions: {}", instr_count);
    println!("cycles: {}", machine.cycles());
    println!("A: 0x{:02X}", cpu.a());
    println!("X: 0x{:02X}", cpu.x());
    println!("Y: 0x{:02X}", cpu.y());
    println!("SP: 0x{:02X}", cpu.sp());
    println!("PC: 0x{:04X}", cpu.pc());
    println!("P (flags): 0b{:08b}", cpu.status());
    println!("mem[0x0200]: 0x{:02X}", m0200);
}
