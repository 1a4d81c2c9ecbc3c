/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

/// Page sizes offered by list screens
pub const PAGE_SIZE_OPTIONS: [i64; 4] = [10, 25, 50, 100];

// =============================================================================
// SEARCH DEBOUNCE
// =============================================================================

/// Default quiet period between the last keystroke and the search dispatch
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

/// Lower bound accepted for the search quiet period
pub const MIN_SEARCH_DEBOUNCE_MS: u64 = 300;

/// Upper bound accepted for the search quiet period
pub const MAX_SEARCH_DEBOUNCE_MS: u64 = 500;
