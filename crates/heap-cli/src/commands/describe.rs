use std::error::Error;
use std::io::{self, Write};

use heap_classify::BuildHeapMatcher;

pub fn run() -> Result<(), Box<dyn Error>> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "The following Build-heap variants have been defined.")?;
    writeln!(out, "Code, loop, heapify")?;
    for (code, name) in BuildHeapMatcher::default().describe_variants() {
        writeln!(out, "{code} {name}")?;
    }
    Ok(())
}
