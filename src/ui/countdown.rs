//! Exit countdown for ambient launches

use console::style;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

/// Print `N...` once per tick, then `Exit.`
///
/// `tick` is one second in real use.
pub fn countdown<W: Write>(out: &mut W, secs: u64, tick: Duration) -> io::Result<()> {
    tracing::info!(
        "The program will exit in {} seconds. You have enough time to take screenshots of the console output.",
        secs
    );
    for remaining in (1..=secs).rev() {
        write!(out, "{}...", remaining)?;
        out.flush()?;
        thread::sleep(tick);
    }
    writeln!(out, "{}", style("Exit.").bold())?;
    Ok(())
}
