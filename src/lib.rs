/// Binary codec: encoder, decoder, type header registry.
pub mod codec;
/// Codec limits loaded from defaults and environment.
pub mod config;
/// Two-word 128-bit integer arithmetic.
pub mod int128;
/// Tracing subscriber setup.
pub mod logging;
/// Tagged value tree.
pub mod value;

// -----------------------------------------------------------------------------
//  Frequently used public types
// -----------------------------------------------------------------------------

/// Error types shared with the `beson-error` crate.
pub use beson_error::{BesonError, BesonResult, ErrorExt, StatusCode};
/// Encode/decode entry points and registry types.
pub use codec::{
    decode, decode_exact, encode, encode_into, Codec, Decoder, Encoder, Header, StandardRegistry,
    TableRegistry, TypeRegistry,
};
/// Codec limits: nesting depth and map key length.
pub use config::CodecConfig;
/// 128-bit integers.
pub use int128::{Int128, UInt128};
/// Logging setup.
pub use logging::{init_logging, LoggingConfig};
/// Value model.
pub use value::{Map, TypeTag, Value};
