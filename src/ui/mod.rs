//! User interface (progress bars, exit countdown)

mod countdown;
mod progress;

pub use countdown::countdown;
pub use progress::ProgressReporter;
