use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatFilter {
    pub format: &'static str,
    pub username: &'static str,
    pub load_pattern: &'static str,
    pub save_extension: &'static str,
}

// Dialog registration order. The icecache load pattern keeps its trailing
// semicolon; older scenes were written against it.
pub const CACHE_FORMATS: [FormatFilter; 6] = [
    FormatFilter {
        format: "icecache",
        username: "Softimage ICECACHE",
        load_pattern: "*.icecache;",
        save_extension: "icecache",
    },
    FormatFilter {
        format: "bin",
        username: "Realflow BIN",
        load_pattern: "*.bin",
        save_extension: "bin",
    },
    FormatFilter {
        format: "prt",
        username: "Krakatoa PRT",
        load_pattern: "*.prt",
        save_extension: "prt",
    },
    FormatFilter {
        format: "bgeo",
        username: "Houdini BGEO",
        load_pattern: "*.bgeo",
        save_extension: "bgeo",
    },
    FormatFilter {
        format: "pdc",
        username: "Maya PDC",
        load_pattern: "*.pdc",
        save_extension: "pdc",
    },
    FormatFilter {
        format: "pda",
        username: "Maya PDA",
        load_pattern: "*.pda",
        save_extension: "pda",
    },
];

pub fn cache_formats() -> &'static [FormatFilter] {
    &CACHE_FORMATS
}

pub fn find_by_extension(extension: &str) -> Option<&'static FormatFilter> {
    let extension = extension.strip_prefix('.').unwrap_or(extension);
    CACHE_FORMATS
        .iter()
        .find(|filter| filter.save_extension.eq_ignore_ascii_case(extension))
}

pub fn format_for_path(path: &Path) -> Option<&'static FormatFilter> {
    let extension = path.extension()?.to_str()?;
    find_by_extension(extension)
}

pub fn is_cache_path(path: &Path) -> bool {
    format_for_path(path).is_some()
}
