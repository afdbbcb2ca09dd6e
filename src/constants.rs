//! Global constants used throughout the resdeps codebase.
//!
//! Configuration keys, command sentinels and the default type table are defined
//! here so the importer, the registry and the CLI agree on them.

/// Default prefix marking a configuration key as a comment.
///
/// Any type name, group name or URL name starting with this prefix is skipped by
/// the config importer. A top-level [`COMMENT_KEY`] string overrides it.
pub const DEFAULT_COMMENT_PREFIX: &str = "--";

/// Top-level configuration key whose string value overrides the comment prefix.
pub const COMMENT_KEY: &str = "comment";

/// Sentinel key of a splice command: `{"$splice": [offset, remove, values...]}`.
pub const SPLICE_KEY: &str = "$splice";

/// Sentinel key of a push command: `{"$push": [values...]}`.
pub const PUSH_KEY: &str = "$push";

/// Extension-table field holding group definitions.
pub const GROUPS_FIELD: &str = "groups";

/// Extension-table field holding URL aliases.
pub const URLS_FIELD: &str = "urls";

/// Config field giving the splice offset for `path` (see `add_resource_paths`).
pub const PATH_OFFSET_FIELD: &str = "pathOffset";

/// Config field giving the splice remove count for `path`.
pub const PATH_REPLACE_FIELD: &str = "pathReplace";

/// Marker that forces a group member to be blocked.
pub const BLOCK_MARKER: char = '!';

/// Separator between the type qualifier and the name in a group member.
pub const TYPE_SEPARATOR: char = ':';

/// Built-in resource types: `(type, as keyword, collection name, extensions)`.
///
/// Extensions are listed most-specific first so minified builds win over sources.
pub const BUILTIN_TYPES: &[(&str, &str, &str, &[&str])] = &[
    ("js", "script", "scripts", &[".min.js", ".js"]),
    ("css", "style", "stylesheets", &[".min.css", ".css"]),
    ("font", "font", "fonts", &[".woff2", ".woff", ".otf", ".ttf"]),
];
