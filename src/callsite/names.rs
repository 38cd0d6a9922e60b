//! Display forms for resolved symbols
//!
//! Turns demangled Rust paths such as
//! `<my_app::net::Server as my_app::Service>::run` into the short
//! `package/function` form printed in every log line, and source paths into
//! bare file names.

use std::path::Path;

/// Remove the trailing `::h0123456789abcdef` hash that legacy-mangled
/// symbols carry when they are printed without the alternate flag.
pub fn strip_hash(name: &str) -> &str {
    if let Some(pos) = name.rfind("::h") {
        let hash = &name[pos + 3..];
        if hash.len() == 16 && hash.bytes().all(|b| b.is_ascii_hexdigit()) {
            return &name[..pos];
        }
    }
    name
}

/// Remove a trailing compiler shim segment such as `::{{reify-shim}}` or
/// `::{shim:reify#0}`. Shims forward calls made through trait objects or
/// function pointers to the named function.
pub fn strip_shim(name: &str) -> &str {
    match name.rfind("::{") {
        Some(pos) if is_shim_segment(&name[pos + 2..]) => &name[..pos],
        _ => name,
    }
}

fn is_shim_segment(segment: &str) -> bool {
    segment.starts_with("{shim:") || (segment.starts_with("{{") && segment.ends_with("-shim}}"))
}

/// Last path component of a source file, or an empty string when unknown.
pub fn short_filename(file: Option<&Path>) -> String {
    file.and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Short qualified name of a function: `<package>/<function>`.
///
/// The function part is the final path segment, extended backwards over a
/// type segment (`Server::run`) and over the owner of any closure
/// (`main::{{closure}}`). The package part is the single segment before it.
///
/// # Examples
///
/// ```
/// use lwlog::callsite::names::short_function_name;
///
/// assert_eq!(short_function_name("my_app::net::serve"), "net/serve");
/// assert_eq!(short_function_name("my_app::net::Server::run"), "net/Server::run");
/// assert_eq!(short_function_name("<lwlog::StdLogger as lwlog::Logger>::info"), "lwlog/StdLogger::info");
/// ```
pub fn short_function_name(qualified: &str) -> String {
    let normalized = normalize_qualified_self(strip_shim(strip_hash(qualified)));
    let segments: Vec<&str> = split_path(&normalized)
        .into_iter()
        .filter(|segment| !segment.is_empty() && !segment.starts_with('<'))
        .collect();

    let Some(mut start) = segments.len().checked_sub(1) else {
        return String::new();
    };
    while start > 0 && extends_function(segments[start], segments[start - 1]) {
        start -= 1;
    }

    let function = segments[start..].join("::");
    match start.checked_sub(1) {
        Some(package) => format!("{}/{}", segments[package], function),
        None => function,
    }
}

fn extends_function(current: &str, previous: &str) -> bool {
    current.starts_with("{{") || previous.starts_with(|c: char| c.is_ascii_uppercase())
}

/// Rewrite a leading `<Self as Trait>::rest` (or `<Self>::rest`) to `Self::rest`.
fn normalize_qualified_self(name: &str) -> String {
    if !name.starts_with('<') {
        return name.to_string();
    }

    let mut depth = 0usize;
    let mut close = None;
    for (index, c) in name.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    close = Some(index);
                    break;
                }
            }
            _ => {}
        }
    }
    let Some(close) = close else {
        return name.to_string();
    };

    let inner = &name[1..close];
    let self_type = top_level_find(inner, " as ").map_or(inner, |pos| &inner[..pos]);
    let self_type = top_level_find(self_type, "<").map_or(self_type, |pos| &self_type[..pos]);
    format!("{}{}", self_type.trim_start_matches('&'), &name[close + 1..])
}

/// Split on `::` outside of generic brackets.
fn split_path(name: &str) -> Vec<&str> {
    let bytes = name.as_bytes();
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut index = 0;
    while index < bytes.len() {
        match bytes[index] {
            b'<' => depth += 1,
            b'>' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(index + 1) == Some(&b':') => {
                segments.push(&name[start..index]);
                index += 2;
                start = index;
                continue;
            }
            _ => {}
        }
        index += 1;
    }
    segments.push(&name[start..]);
    segments
}

fn top_level_find(haystack: &str, needle: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (index, c) in haystack.char_indices() {
        if depth == 0 && haystack[index..].starts_with(needle) {
            return Some(index);
        }
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    None
}
