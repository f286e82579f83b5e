pub mod settings;

pub use settings::{CodecConfig, DEFAULT_MAX_DEPTH, MAX_DEPTH_CEILING, MAX_SHORT_STRING_LEN};
