//! Age-policy exceptions.

mod exceptions;

pub use exceptions::ExceptionSet;
