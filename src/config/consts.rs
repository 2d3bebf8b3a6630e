// src/config/consts.rs

// Net config
pub const DEFAULT_URL: &str = "https://boxrec.com/en/box-pro/125969";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const TIMEOUT_SECS: u64 = 30;
pub const REQUEST_PAUSE_MS: u64 = 1_000; // be polite

// Anti-bot challenge pages come back 200 sometimes; sniff the body too.
pub const CHALLENGE_MARKERS: &[&str] = &[
    "cf-challenge",
    "challenge-platform",
    "just a moment...",
    "attention required!",
    "g-recaptcha",
];

// Local cache
pub const STORE_DIR: &str = ".store";
pub const CACHE_TTL_SECS: u64 = 3_600;

// Extract
pub const UNKNOWN_NAME: &str = "unknown";
pub const MISSING_OPPONENT: &str = "N/A";
pub const HEURISTIC_MIN_ROWS: usize = 5;
pub const LEGACY_MIN_HEADERS: usize = 5;
pub const MARKER_CLASSES: &[&str] = &["SR", "ad", "advert", "advertisement", "spacer"];

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_BOUTS_SUBDIR: &str = "bouts";
pub const DEFAULT_FILE: &str = "bouts";
