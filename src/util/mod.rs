pub mod adf;
pub mod clipboard;
pub mod time;
