pub mod process;
pub mod project;
pub mod signal;

pub use process::ProcessRecord;
pub use project::ProjectRecord;
pub use signal::ControlSignal;
