pub mod interesting;

pub use interesting::{interesting_directories, is_interesting, INTERESTING_KEYWORDS};
