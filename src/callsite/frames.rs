//! Stack capture and symbolication
//!
//! The only module that talks to the `backtrace` crate. It locates its own
//! frame on the live stack, keeps a bounded window of the frames above the
//! caller, and expands each physical frame into the logical frames
//! (inlined calls included) that symbolication reports for it.

use super::names::strip_hash;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;

/// Number of caller frames examined above a logging entry point.
pub const CAPTURE_DEPTH: usize = 4;

/// How far below the anchor the stack walker's own frames may reach.
const ANCHOR_SEARCH_LIMIT: usize = 16;

/// Set on every inlined-frame token; never set on a user-space entry address.
const INLINED_TAG: u64 = 1 << 63;

/// Stable identity of a compiled function for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionId(u64);

impl FunctionId {
    /// Identity of a function that owns a physical frame.
    pub const fn from_entry(entry: usize) -> Self {
        Self(entry as u64)
    }

    /// Identity of a function the compiler inlined into the function at `entry`.
    pub fn inlined(entry: usize, name: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        entry.hash(&mut hasher);
        name.hash(&mut hasher);
        Self(hasher.finish() | INLINED_TAG)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }

    pub const fn is_inlined(self) -> bool {
        self.0 & INLINED_TAG != 0
    }
}

/// One logical frame after symbolication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFrame {
    pub id: FunctionId,
    /// Demangled name without the trailing symbol hash; empty if unknown.
    pub name: String,
    pub file: Option<PathBuf>,
    /// Zero if unknown.
    pub line: u32,
}

/// Demangled-name suffix of [`capture`], used when entry addresses are unavailable.
const CAPTURE_NAME_SUFFIX: &str = "::callsite::frames::capture";

/// Capture up to `depth` physical frames, starting `skip` frames above the
/// function that called `capture` (that function is frame 0).
///
/// Returns an empty vector if `capture` cannot find its own frame on the stack.
#[inline(never)]
pub fn capture(skip: usize, depth: usize) -> Vec<backtrace::Frame> {
    let own_entry = (capture as fn(usize, usize) -> Vec<backtrace::Frame>) as usize;
    let mut raw = Vec::with_capacity(ANCHOR_SEARCH_LIMIT + skip + depth);
    let mut anchor_at = None;

    backtrace::trace(|frame| {
        if anchor_at.is_none() && frame.symbol_address() as usize == own_entry {
            anchor_at = Some(raw.len());
        }
        raw.push(frame.clone());
        let limit = anchor_at.unwrap_or(ANCHOR_SEARCH_LIMIT);
        raw.len() < limit + 1 + skip + depth
    });

    // Platforms whose unwinder cannot report entry addresses fall back to names.
    let Some(anchor) = anchor_at.or_else(|| find_anchor_by_name(&raw)) else {
        return Vec::new();
    };

    raw.into_iter().skip(anchor + 1 + skip).take(depth).collect()
}

fn find_anchor_by_name(raw: &[backtrace::Frame]) -> Option<usize> {
    raw.iter().take(ANCHOR_SEARCH_LIMIT).position(|frame| {
        symbolize(frame)
            .iter()
            .any(|logical| logical.name.ends_with(CAPTURE_NAME_SUFFIX))
    })
}

/// Expand a physical frame into its logical frames, innermost first.
///
/// A frame with no symbol information yields a single frame with an empty
/// name, no file, and line zero.
pub fn symbolize(frame: &backtrace::Frame) -> Vec<ResolvedFrame> {
    let entry = frame.symbol_address() as usize;
    let mut symbols = Vec::new();

    backtrace::resolve_frame(frame, |symbol| {
        let name = symbol
            .name()
            .map(|name| strip_hash(&format!("{:#}", name)).to_string())
            .unwrap_or_default();
        symbols.push((name, symbol.filename().map(PathBuf::from), symbol.lineno().unwrap_or(0)));
    });

    if symbols.is_empty() {
        return vec![ResolvedFrame {
            id: FunctionId::from_entry(entry),
            name: String::new(),
            file: None,
            line: 0,
        }];
    }

    // The last symbol is the function that owns the physical frame.
    let outermost = symbols.len() - 1;
    symbols
        .into_iter()
        .enumerate()
        .map(|(index, (name, file, line))| ResolvedFrame {
            id: if index == outermost {
                FunctionId::from_entry(entry)
            } else {
                FunctionId::inlined(entry, &name)
            },
            name,
            file,
            line,
        })
        .collect()
}
