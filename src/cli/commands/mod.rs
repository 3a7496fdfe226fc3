mod analyze;
mod batch;
mod config;
mod personas;
mod status;

pub use analyze::AnalyzeArgs;
pub use batch::BatchArgs;
pub use config::ConfigCommand;
pub use personas::LibraryArgs;

pub use analyze::handle_analyze;
pub use batch::handle_batch;
pub use config::handle_config;
pub use personas::{handle_jobs, handle_personas};
pub use status::handle_status;
