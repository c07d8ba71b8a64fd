pub mod ordinal;
pub mod signs;

pub use ordinal::ordinal;
pub use signs::{get_sign_index, ZodiacPosition, ZodiacSign};
