pub mod format;

pub use format::{LocaleFormat, LocaleFormatter};
