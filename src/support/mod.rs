pub mod errors;
pub mod logging;
pub mod time;
