//! Parse engine: dispatch, element consumption, actions and self-extension.

mod context;
mod error;
mod frame;
mod limits;
mod parser;
mod trace;


pub use context::ActionContext;
pub use error::Unwind;
pub use limits::ParseLimits;
pub use parser::Parser;
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
