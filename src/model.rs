pub mod complexity;
pub mod daily;
pub mod guess;
pub mod language;
pub mod regex;
pub mod snippet;
