//! Recognition of the logging facility's own entry points
//!
//! A frame is logging-internal when its function's qualified name ends in one
//! of the three entry-point names of [`Logger`](crate::Logger). That covers
//! `<StdLogger as Logger>::info` as well as any user wrapper whose name ends
//! in `::debug`, `::info` or `::error`.

use super::frames::FunctionId;
use super::names::{strip_hash, strip_shim};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Path suffixes that mark a function as a logging entry point.
pub const LOGGING_FUNCTION_SUFFIXES: [&str; 3] = ["::debug", "::info", "::error"];

static GLOBAL_CLASSIFIER: OnceLock<Arc<FunctionClassifier>> = OnceLock::new();

/// Whether a demangled function name belongs to a logging entry point.
pub fn is_logging_function_name(name: &str) -> bool {
    let name = strip_shim(strip_hash(name));
    LOGGING_FUNCTION_SUFFIXES
        .iter()
        .any(|suffix| name.ends_with(suffix))
}

/// Classify `name` through the process-wide classifier cache.
pub fn is_logging_function(id: FunctionId, name: &str) -> bool {
    FunctionClassifier::global().classify(id, name)
}

/// Cache of function identity to "is a logging entry point".
///
/// Entries are added once per distinct function and never removed.
#[derive(Debug, Default)]
pub struct FunctionClassifier {
    known: RwLock<HashMap<FunctionId, bool>>,
}

impl FunctionClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide classifier shared by every logger that is not given
    /// its own.
    pub fn global() -> Arc<FunctionClassifier> {
        Arc::clone(GLOBAL_CLASSIFIER.get_or_init(|| Arc::new(FunctionClassifier::new())))
    }

    pub fn classify(&self, id: FunctionId, name: &str) -> bool {
        if let Some(&is_logger) = self.known.read().get(&id) {
            return is_logger;
        }

        let is_logger = is_logging_function_name(name);

        // A concurrent miss for the same function stores the same answer.
        self.known.write().insert(id, is_logger);
        is_logger
    }

    /// Cached classification, if this function has been seen.
    pub fn cached(&self, id: FunctionId) -> Option<bool> {
        self.known.read().get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.known.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.read().is_empty()
    }
}
