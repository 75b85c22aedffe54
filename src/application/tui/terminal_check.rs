use crossterm::{
    ExecutableCommand,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    tty::IsTty,
};
use std::io::{self, stdout};

/// Probe the capabilities the demo view needs, reporting each step
pub fn check_terminal() -> io::Result<()> {
    println!("Checking terminal capabilities...");

    if IsTty::is_tty(&stdout()) {
        println!("✓ Running in a TTY");
    } else {
        println!("✗ Not running in a TTY");
        return Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "The demo view requires a TTY",
        ));
    }

    enable_raw_mode()?;
    let screen = stdout().execute(EnterAlternateScreen).map(|_| ());
    let restored = stdout().execute(LeaveAlternateScreen).map(|_| ());
    disable_raw_mode()?;

    screen?;
    println!("✓ Raw mode and alternate screen available");
    restored?;
    println!("✓ Terminal restored");

    log::info!("Terminal check passed");
    Ok(())
}
