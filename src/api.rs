pub mod complexity;
pub mod language;
pub mod regex;
pub mod snippet;

mod helper;
