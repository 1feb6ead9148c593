pub mod error;
pub mod interpreter;
pub mod parser;
pub mod scanner;
pub mod stmt;
pub mod token;

mod environment;
mod value;
