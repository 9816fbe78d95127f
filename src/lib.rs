pub mod body;
pub mod extractors;
pub mod interpret;
pub mod pipeline;
pub mod responder;
pub mod types;

pub use interpret::{BodyInterpreter, InterpretError, interpret};
pub use pipeline::Pipeline;
