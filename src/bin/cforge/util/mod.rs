pub mod convert;
pub mod format;
pub mod path;
pub mod text;
