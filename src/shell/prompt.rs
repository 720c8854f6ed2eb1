use anyhow::{bail, Context, Result};

use std::io::{BufRead, Write};
use std::str::FromStr;

/// Reads one line, without its line ending
///
/// Returns `None` at end of input.
pub fn next_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read input")?;

    if read == 0 {
        return Ok(None);
    }

    let trimmed = line.trim_end_matches(&['\r', '\n'][..]).len();
    line.truncate(trimmed);
    Ok(Some(line))
}

/// Prints a prompt and reads the reply
///
/// # Errors
///
/// Fails if input ends before a reply arrives
pub fn read_line<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<String> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    match next_line(input)? {
        Some(line) => Ok(line),
        None => bail!("Input ended while waiting for '{}'", prompt.trim()),
    }
}

/// Prompts until the reply parses as `T`, apologising for each bad reply
fn read_parsed<T, R, W>(input: &mut R, output: &mut W, prompt: &str, kind: &str) -> Result<T>
where
    T: FromStr,
    R: BufRead,
    W: Write,
{
    loop {
        let response = read_line(input, output, prompt)?;

        match response.trim().parse() {
            Ok(value) => return Ok(value),
            Err(_) => writeln!(output, "I'm sorry, but '{}' isn't {}.", response, kind)?,
        }
    }
}

/// Prompts for an integer amount
pub fn read_int<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<i32> {
    read_parsed(input, output, prompt, "an integer")
}

/// Prompts for a nonce
pub fn read_long<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<u64> {
    read_parsed(input, output, prompt, "a long integer")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_line_strips_line_ending() {
        let mut input = Cursor::new("hello world\r\nnext\n");
        let mut output = Vec::new();

        let line = read_line(&mut input, &mut output, "Say: ").unwrap();

        assert_eq!(line, "hello world");
        assert_eq!(String::from_utf8(output).unwrap(), "Say: ");
    }

    #[test]
    fn test_read_line_at_end_of_input() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();

        assert!(read_line(&mut input, &mut output, "Say: ").is_err());
    }

    #[test]
    fn test_read_int_reprompts() {
        let mut input = Cursor::new("twelve\n3.5\n-12\n");
        let mut output = Vec::new();

        let value = read_int(&mut input, &mut output, "Amount: ").unwrap();
        assert_eq!(value, -12);

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("I'm sorry, but 'twelve' isn't an integer."));
        assert!(text.contains("I'm sorry, but '3.5' isn't an integer."));
        assert_eq!(text.matches("Amount: ").count(), 3);
    }

    #[test]
    fn test_read_long() {
        let mut input = Cursor::new("abc\n18446744073709551615\n");
        let mut output = Vec::new();

        assert_eq!(read_long(&mut input, &mut output, "Nonce: ").unwrap(), u64::MAX);
        assert!(String::from_utf8(output)
            .unwrap()
            .contains("I'm sorry, but 'abc' isn't a long integer."));
    }

    #[test]
    fn test_read_int_gives_up_at_end_of_input() {
        let mut input = Cursor::new("nope\n");
        let mut output = Vec::new();

        assert!(read_int(&mut input, &mut output, "Amount: ").is_err());
    }
}
