//! Path and file name helpers

use std::ffi::OsStr;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

use crate::preview::WORKSPACE;

lazy_static! {
    // Control characters and either path separator never appear in a stored name
    static ref UNSAFE_CHARS: Regex = Regex::new(r"[\x00-\x1f\x7f/\\]")
        .expect("unsafe character pattern is valid");
}

/// Final path component as a string, empty if there is none
pub fn file_name_string(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Whether `name` is a single path component that is safe to join onto the cache directory
///
/// Any printable characters are allowed, spaces and non-ASCII included.
/// `.`, `..` and anything with a directory part are refused.
pub fn is_plain_file_name(name: &str) -> bool {
    if name.is_empty() || name == "." || name == ".." || UNSAFE_CHARS.is_match(name) {
        return false;
    }
    Path::new(name).file_name() == Some(OsStr::new(name))
}

/// Insert `timestamp` between the base name and the extension of `file_name`
///
/// The base name ends at the first dot, so `meta.aux.xml` becomes
/// `meta.<timestamp>.aux.xml`. A name without a dot gets the timestamp
/// appended.
pub fn embed_timestamp(file_name: &str, timestamp: &str) -> String {
    match file_name.split_once('.') {
        Some((base, rest)) => format!("{}.{}.{}", base, timestamp, rest),
        None => format!("{}.{}", file_name, timestamp),
    }
}

/// Strip the `geonode:` workspace prefix from a layer name
///
/// Other prefixes are part of the name and stay.
pub fn strip_workspace(layer_name: &str) -> &str {
    layer_name.strip_prefix(WORKSPACE)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(layer_name)
}
