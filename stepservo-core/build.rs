//! Build script for stepservo-core
//!
//! Generates the quarter-wave sine table used by the commutation engine.
//! The table is integer data in the firmware; floating point only runs here,
//! on the host.

use std::env;
use std::f64::consts::FRAC_PI_2;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

/// Entries per quarter wave (must match `SINE_STEPS / 4` in `angle.rs`)
const QUARTER_STEPS: usize = 256;

/// Peak stored amplitude (`SINE_MAX - 1`)
const PEAK: f64 = 32767.0;

fn main() -> io::Result<()> {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let mut f = File::create(out_dir.join("sine_table.rs"))?;

    writeln!(f, "/// Quarter-wave sine, `0..=SINE_STEPS/4` inclusive")?;
    writeln!(f, "pub(crate) static QUARTER_SINE: [i16; {}] = [", QUARTER_STEPS + 1)?;
    for i in 0..=QUARTER_STEPS {
        let phase = FRAC_PI_2 * i as f64 / QUARTER_STEPS as f64;
        let value = (PEAK * phase.sin()).round() as i16;
        writeln!(f, "    {},", value)?;
    }
    writeln!(f, "];")?;

    Ok(())
}
