/*
Module: mappers

Declares the Atari 2600 board implementations and re-exports them. NROM
lives next to the `Mapper` trait in `crate::mapper`.

Implemented:
- Atari 4K (standard, no banking)
- Atari F8 (two 4 KiB banks, hotspot switching)
*/

pub mod atari4k;
pub mod atari_f8;

pub use atari_f8::AtariF8;
pub use atari4k::Atari4k;
