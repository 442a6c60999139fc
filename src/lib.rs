pub mod evaluator;
pub mod printer;
pub mod reader;
pub mod repl;
