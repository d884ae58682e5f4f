//! Headless trace runner.
//!
//! Loads a raw PRG image (16 or 32 KiB) as an NROM cartridge, powers the CPU on and prints
//! one trace line per instruction.
//! Usage: ricoh path/to/prg.bin [steps]

use std::env;
use std::fs;
use std::process;

use ansi_term::Colour::{Green, Red};
use ricoh::{
    bus::NesBus,
    cartridge::mapper::{Mirroring, mapper0::Mapper0},
    cpu::cpu::CPU,
};

const DEFAULT_STEPS: u64 = 100;

fn usage() -> ! {
    eprintln!("usage: ricoh <prg.bin> [steps]");
    process::exit(2);
}

fn main() {
    let mut args = env::args().skip(1);
    let Some(path) = args.next() else { usage() };
    let steps = match args.next() {
        Some(arg) => arg.parse().unwrap_or_else(|_| usage()),
        None => DEFAULT_STEPS,
    };

    let prg = match fs::read(&path) {
        Ok(prg) => prg,
        Err(err) => {
            eprintln!("{} {}: {}", Red.bold().paint("ERROR"), path, err);
            process::exit(1);
        }
    };

    // No CHR supplied: the mapper provides 8 KiB of CHR RAM
    let mapper = match Mapper0::new(prg, Vec::new(), Mirroring::Horizontal) {
        Ok(mapper) => mapper,
        Err(err) => {
            eprintln!("{} {}: {}", Red.bold().paint("ERROR"), path, err);
            process::exit(1);
        }
    };

    let mut cpu = CPU::new(NesBus::new(Box::new(mapper)));
    if let Err(fault) = cpu.power() {
        eprintln!("{} {}", Red.bold().paint("FAULT"), fault);
        process::exit(1);
    }

    for _ in 0..steps {
        match cpu.step() {
            Ok(step) => println!("{} {}", Green.bold().paint("STEP"), step),
            Err(fault) => {
                eprintln!("{} {}", Red.bold().paint("FAULT"), fault);
                process::exit(1);
            }
        }
    }
}
