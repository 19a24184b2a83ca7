pub mod render_log;
pub mod runtime_logger;
