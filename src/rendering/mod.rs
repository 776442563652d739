pub mod png;

pub use self::png::{decode_png, encode_png, read_png, write_png};
