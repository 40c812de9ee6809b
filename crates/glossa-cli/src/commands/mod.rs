//! Command implementations.

mod check;
mod convert;
mod negotiate;
mod translate;

pub use check::{CheckCommand, CheckReport, LocaleReport};
pub use convert::ConvertCommand;
pub use negotiate::NegotiateCommand;
pub use translate::TranslateCommand;
