//! Line-oriented prompts over any `BufRead`/`Write` pair.
//!
//! Menus never see raw I/O errors or end of input as values: both surface
//! as [`Stop`] and unwind the menu stack.

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use dreams_core::Money;

/// Why the menus stopped reading.
#[derive(Debug)]
pub enum Stop {
    /// Input closed
    Eof,
    Io(io::Error),
}

impl From<io::Error> for Stop {
    fn from(err: io::Error) -> Self {
        Stop::Io(err)
    }
}

pub type MenuResult<T = ()> = Result<T, Stop>;

pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompt { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Writes one line.
    pub fn say(&mut self, text: impl Display) -> MenuResult {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Prints `label` and reads one trimmed line.
    pub fn line(&mut self, label: &str) -> MenuResult<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(Stop::Eof);
        }
        Ok(buf.trim().to_string())
    }

    /// Reads until the answer parses as `T`.
    pub fn number<T: FromStr>(&mut self, label: &str) -> MenuResult<T> {
        loop {
            let answer = self.line(label)?;
            match answer.parse() {
                Ok(value) => return Ok(value),
                Err(_) => self.say(format!("'{}' is not a valid number.", answer))?,
            }
        }
    }

    /// Reads until the answer parses as an amount, e.g. `1299.90`.
    pub fn money(&mut self, label: &str) -> MenuResult<Money> {
        loop {
            let answer = self.line(label)?;
            match answer.parse::<Money>() {
                Ok(value) => return Ok(value),
                Err(e) => self.say(e)?,
            }
        }
    }

    /// Yes/no question; anything other than `y`/`yes` is no.
    pub fn confirm(&mut self, label: &str) -> MenuResult<bool> {
        let answer = self.line(&format!("{} [y/N]: ", label))?;
        Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes" | "s" | "si" | "sí"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompt(input: &str) -> Prompt<Cursor<Vec<u8>>, Vec<u8>> {
        Prompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(prompt: Prompt<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(prompt.into_output()).unwrap()
    }

    #[test]
    fn test_number_reprompts_until_valid() {
        let mut p = prompt("abc\n\n 12 \n");
        assert_eq!(p.number::<i64>("Qty: ").unwrap(), 12);

        let out = output(p);
        assert_eq!(out.matches("Qty: ").count(), 3);
        assert!(out.contains("'abc' is not a valid number."));
    }

    #[test]
    fn test_money_accepts_decimals() {
        let mut p = prompt("-5\n1299.9\n");
        assert_eq!(p.money("Price: ").unwrap().cents(), 129990);
        assert!(output(p).contains("amount"));
    }

    #[test]
    fn test_eof_stops() {
        let mut p = prompt("");
        assert!(matches!(p.line("Name: "), Err(Stop::Eof)));

        let mut p = prompt("x\n");
        assert!(matches!(p.number::<u32>("Id: "), Err(Stop::Eof)));
    }

    #[test]
    fn test_confirm() {
        let mut p = prompt("Y\nn\n");
        assert!(p.confirm("Finalize?").unwrap());
        assert!(!p.confirm("Finalize?").unwrap());
    }
}
