//! Request identity: rotated User-Agents and fixed headers.

use rand::seq::SliceRandom;

/// Desktop browser User-Agents rotated across requests.
pub const USER_AGENTS: [&str; 3] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/140.0.7339.210 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:139.0) Gecko/20100101 Firefox/139.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.5 Safari/605.1.15",
];

/// Referer sent with page and image requests.
pub const REFERER: &str = "https://www.google.com";

/// Accept-Language sent with page requests.
pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Browser window widths picked at random.
pub const WINDOW_WIDTHS: [u32; 4] = [1200, 1366, 1440, 1600];

/// Browser window heights picked at random.
pub const WINDOW_HEIGHTS: [u32; 4] = [700, 768, 800, 900];

/// Pick one User-Agent from the pool.
pub fn random_user_agent() -> &'static str {
    USER_AGENTS.choose(&mut rand::thread_rng()).copied().unwrap_or(USER_AGENTS[0])
}

/// Pick a window size from the fixed width and height sets.
pub fn random_window_size() -> (u32, u32) {
    let mut rng = rand::thread_rng();
    let width = WINDOW_WIDTHS.choose(&mut rng).copied().unwrap_or(WINDOW_WIDTHS[0]);
    let height = WINDOW_HEIGHTS.choose(&mut rng).copied().unwrap_or(WINDOW_HEIGHTS[0]);
    (width, height)
}
