//! Call-site attribution
//!
//! Works out which function, file and line a log call came from by walking
//! the stack at log time and skipping the logging facility's own frames.

pub mod classifier;
pub mod frames;
pub mod names;
pub mod resolver;

pub use classifier::{
    is_logging_function, is_logging_function_name, FunctionClassifier, LOGGING_FUNCTION_SUFFIXES,
};
pub use frames::{FunctionId, CAPTURE_DEPTH};
pub use resolver::{CallSite, CallSiteResolver};
