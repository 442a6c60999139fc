use std::io;

use super::evaluator::Object;
use super::reader::Error;

pub fn print_object_to(mut out: impl io::Write, object: &Object) -> io::Result<()> {
    write!(&mut out, "{}", object)
}

pub fn println_to(mut out: impl io::Write, object: &Object) -> io::Result<()> {
    print_object_to(&mut out, object)?;
    writeln!(&mut out)
}

/// print_syntax_errors_to writes a count line followed by one line per error.
pub fn print_syntax_errors_to(mut out: impl io::Write, errors: &[Error]) -> io::Result<()> {
    writeln!(&mut out, "parser has {} error(s).", errors.len())?;
    for error in errors {
        writeln!(&mut out, "parser error: {}", error)?;
    }
    Ok(())
}
