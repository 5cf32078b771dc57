//! Compiler command construction and execution

mod compiler_command;
pub mod invoker;

pub use compiler_command::CompilerCommand;
pub use invoker::{CompileRequest, CompilerInvoker, classify};
