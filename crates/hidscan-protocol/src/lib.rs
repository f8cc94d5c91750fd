pub mod decoder;
pub mod keymap;

pub use decoder::FrameDecoder;
pub use keymap::KeycodeTable;
