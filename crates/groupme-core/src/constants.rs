/// Base URL of the public GroupMe v3 API.
pub const DEFAULT_API_BASE: &str = "https://api.groupme.com/v3";

/// Every remote call is bounded by this timeout.
pub const REQUEST_TIMEOUT_SECS: u64 = 15;

pub const NICKNAME_MIN_CHARS: usize = 1;
pub const NICKNAME_MAX_CHARS: usize = 50;

/// Role shown for members whose record carries no roles.
pub const DEFAULT_ROLE: &str = "User";

/// Nickname used when adding a user whose existing nickname cannot be found.
pub const UNKNOWN_USER: &str = "Unknown User";

pub const UNKNOWN_GROUP: &str = "Unknown Group";

pub const UNKNOWN_ERROR: &str = "Unknown error";
