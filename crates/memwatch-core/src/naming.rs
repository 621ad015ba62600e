//! Profile artifact naming.
//!
//! Names look like `20240305102030_1709634030.pprof`: a fixed-width UTC
//! timestamp (lexicographically sortable) followed by the same instant in Unix
//! epoch seconds. Existing profile consumers depend on this exact shape.

use chrono::{DateTime, Utc};

/// File extension for every emitted profile.
pub const PROFILE_EXTENSION: &str = "pprof";

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Derive the artifact name for a profile captured at `captured_at`.
pub fn profile_file_name(captured_at: &DateTime<Utc>) -> String {
    format!(
        "{}_{}.{}",
        captured_at.format(TIMESTAMP_FORMAT),
        captured_at.timestamp(),
        PROFILE_EXTENSION
    )
}
