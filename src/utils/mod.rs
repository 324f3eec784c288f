pub mod error;
pub mod format;
pub mod logging;
pub mod output;
pub mod time_format;

pub use output::{DisplayFormatter, OutputStyle, print_success, print_warning};
