//! Call-site resolution
//!
//! Finds the first frame above the logging facility that is not itself a
//! logging entry point, and renders it as `package/function` plus file name
//! and line. The display strings are cached per function; the line number is
//! always taken from the live frame, or from the caller's tracked location
//! when one is supplied.

use super::classifier::FunctionClassifier;
use super::frames::{self, FunctionId, ResolvedFrame, CAPTURE_DEPTH};
use super::names::{short_filename, short_function_name};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::panic::Location;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Frames a logger's own entry point may add below the caller: the trait
/// method and, for calls through `dyn Logger`, the compiler's forwarding shim.
const ENTRY_FRAME_ALLOWANCE: usize = 2;

/// Source location a log line is attributed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    /// Last path component of the source file
    pub filename: Arc<str>,
    /// `package/function`
    pub function: Arc<str>,
    pub line: u32,
}

impl CallSite {
    /// Placeholder used when nothing could be resolved.
    pub fn unknown() -> Self {
        Self {
            filename: Arc::from(""),
            function: Arc::from(""),
            line: 0,
        }
    }

    /// File and line of a tracked location, with no function name.
    pub fn at_location(location: &Location<'_>) -> Self {
        Self {
            filename: Arc::from(short_filename(Some(Path::new(location.file())))),
            function: Arc::from(""),
            line: location.line(),
        }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:({}:{})", self.function, self.filename, self.line)
    }
}

#[derive(Debug)]
struct SiteDetails {
    filename: Arc<str>,
    function: Arc<str>,
}

/// Walks the stack to find who called the logger.
///
/// Each logger owns one resolver, and with it a cache of display strings.
/// The classifier is shared and defaults to the process-wide instance.
#[derive(Debug)]
pub struct CallSiteResolver {
    classifier: Arc<FunctionClassifier>,
    entry_prefix: Option<&'static str>,
    sites: RwLock<HashMap<FunctionId, SiteDetails>>,
    /// Entry-point functions already seen below the caller.
    entry_functions: RwLock<HashSet<FunctionId>>,
    /// Return addresses whose frame hosts no inlined code.
    plain_frames: RwLock<HashSet<usize>>,
    symbolized: AtomicU64,
}

impl CallSiteResolver {
    pub fn new() -> Self {
        Self::with_classifier(FunctionClassifier::global())
    }

    pub fn with_classifier(classifier: Arc<FunctionClassifier>) -> Self {
        Self {
            classifier,
            entry_prefix: None,
            sites: RwLock::new(HashMap::new()),
            entry_functions: RwLock::new(HashSet::new()),
            plain_frames: RwLock::new(HashSet::new()),
            symbolized: AtomicU64::new(0),
        }
    }

    /// Treat leading frames whose demangled names start with `prefix` as the
    /// logger's own entry point. They are dropped before the
    /// [`CAPTURE_DEPTH`] window is counted, whether or not the compiler kept
    /// them on the stack.
    #[must_use]
    pub fn with_entry_prefix(mut self, prefix: &'static str) -> Self {
        self.entry_prefix = Some(prefix);
        self
    }

    pub fn classifier(&self) -> &Arc<FunctionClassifier> {
        &self.classifier
    }

    /// Resolve the call site `skip_frames` frames above this call.
    ///
    /// Frame 0 is `resolve` itself, so `resolve(1)` describes its direct
    /// caller. At most [`CAPTURE_DEPTH`] frames are examined from there;
    /// logging entry points among them are skipped, and if every examined
    /// frame is one, the last of them is used.
    #[inline(never)]
    pub fn resolve(&self, skip_frames: usize) -> CallSite {
        let captured = frames::capture(skip_frames, CAPTURE_DEPTH + ENTRY_FRAME_ALLOWANCE);
        self.select(&captured, None)
    }

    /// Like [`resolve`](Self::resolve), checked against the location the
    /// entry point was called from.
    ///
    /// `caller` is where the direct caller invoked the entry point, as
    /// reported by `#[track_caller]`. If the first frame above the entry
    /// point was compiled at a different file and line, the direct caller's
    /// frame is gone (a tail call), and the frame found in its place belongs
    /// to someone else: the result then carries `caller`'s file and line and
    /// no function name.
    #[inline(never)]
    pub fn resolve_at(&self, skip_frames: usize, caller: Option<&Location<'_>>) -> CallSite {
        let captured = frames::capture(skip_frames, CAPTURE_DEPTH + ENTRY_FRAME_ALLOWANCE);
        self.select(&captured, caller)
    }

    fn select(&self, captured: &[backtrace::Frame], caller: Option<&Location<'_>>) -> CallSite {
        let mut examined = 0;
        let mut last = None;

        for physical in captured {
            let entry = FunctionId::from_entry(physical.symbol_address() as usize);
            let plain = self.plain_frames.read().contains(&(physical.ip() as usize));

            if examined == 0 && plain && self.entry_functions.read().contains(&entry) {
                continue;
            }
            if examined > 0 && plain && self.classifier.cached(entry) == Some(true) {
                examined += 1;
                last = Some(physical);
                if examined == CAPTURE_DEPTH {
                    break;
                }
                continue;
            }

            let logical = self.symbolize(physical);
            if examined == 0 && self.is_entry_point(&logical) {
                if logical.len() == 1 {
                    self.entry_functions.write().insert(entry);
                }
                continue;
            }

            for (index, frame) in logical.iter().enumerate() {
                let direct = examined == 0 && index == 0;
                if direct {
                    if let Some(location) = caller {
                        if compiled_elsewhere(frame, location) {
                            return CallSite::at_location(location);
                        }
                    }
                }
                if !self.classifier.classify(frame.id, &frame.name) {
                    let site = self.describe(frame);
                    return match caller {
                        Some(location) if direct => CallSite {
                            filename: Arc::from(short_filename(Some(Path::new(location.file())))),
                            line: location.line(),
                            ..site
                        },
                        _ => site,
                    };
                }
            }

            examined += 1;
            last = Some(physical);
            if examined == CAPTURE_DEPTH {
                break;
            }
        }

        // Every examined frame was a logging entry point: use the outermost.
        match last.and_then(|physical| self.symbolize(physical).pop()) {
            Some(frame) => self.describe(&frame),
            None => caller.map_or_else(CallSite::unknown, CallSite::at_location),
        }
    }

    fn symbolize(&self, physical: &backtrace::Frame) -> Vec<ResolvedFrame> {
        self.symbolized.fetch_add(1, Ordering::Relaxed);
        let logical = frames::symbolize(physical);
        if logical.len() == 1 {
            self.plain_frames.write().insert(physical.ip() as usize);
        }
        logical
    }

    fn is_entry_point(&self, logical: &[ResolvedFrame]) -> bool {
        match self.entry_prefix {
            Some(prefix) => logical.iter().all(|frame| frame.name.starts_with(prefix)),
            None => false,
        }
    }

    fn describe(&self, frame: &ResolvedFrame) -> CallSite {
        if let Some(details) = self.sites.read().get(&frame.id) {
            return CallSite {
                filename: Arc::clone(&details.filename),
                function: Arc::clone(&details.function),
                line: frame.line,
            };
        }

        let details = SiteDetails {
            filename: Arc::from(short_filename(frame.file.as_deref())),
            function: Arc::from(short_function_name(&frame.name)),
        };
        let site = CallSite {
            filename: Arc::clone(&details.filename),
            function: Arc::clone(&details.function),
            line: frame.line,
        };

        // A concurrent miss for the same function stores identical strings.
        self.sites.write().insert(frame.id, details);
        site
    }

    /// Number of distinct functions with cached display strings.
    pub fn cached_sites(&self) -> usize {
        self.sites.read().len()
    }

    pub fn is_cached(&self, id: FunctionId) -> bool {
        self.sites.read().contains_key(&id)
    }

    /// Physical frames symbolized so far. Frames already known to be entry
    /// points or logging wrappers are skipped without symbolication.
    pub fn frames_symbolized(&self) -> u64 {
        self.symbolized.load(Ordering::Relaxed)
    }
}

/// Whether `frame` has line information that places it somewhere other than
/// `location`.
fn compiled_elsewhere(frame: &ResolvedFrame, location: &Location<'_>) -> bool {
    let Some(file) = frame.file.as_deref() else {
        return false;
    };
    if frame.line == 0 {
        return false;
    }
    let tracked = Path::new(location.file());
    let same_file = file.ends_with(tracked) || tracked.ends_with(file);
    !same_file || frame.line != location.line()
}

impl Default for CallSiteResolver {
    fn default() -> Self {
        Self::new()
    }
}
