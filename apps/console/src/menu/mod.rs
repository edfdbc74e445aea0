//! # Console Menus
//!
//! ## Menu Tree
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Main                                                                   │
//! │  ├── 1 Customers ── add, list, find, update, deactivate, reactivate     │
//! │  ├── 2 Products ─── add electronics/apparel/general, list, find,        │
//! │  │                  search, adjust stock, update price, (de)activate    │
//! │  ├── 3 New sale ─── customer → products → finalize / cancel / edit      │
//! │  ├── 4 Sales ────── list, by state, receipt (text/JSON), cancel open    │
//! │  └── 0 Exit                                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Failed operations print an error and return to the current menu. End of
//! input leaves every menu and ends the session normally.

mod customers;
mod products;
mod sales;

use std::io::{BufRead, Write};

use tracing::{debug, info};

use dreams_core::Money;
use dreams_store::Store;

use crate::config::ConsoleConfig;
use crate::error::{ConsoleError, ConsoleResult};
use crate::prompt::{MenuResult, Prompt, Stop};

pub struct Console<'a, R, W> {
    store: &'a mut Store,
    config: &'a ConsoleConfig,
    prompt: Prompt<R, W>,
}

impl<'a, R: BufRead, W: Write> Console<'a, R, W> {
    pub fn new(store: &'a mut Store, config: &'a ConsoleConfig, input: R, output: W) -> Self {
        Console {
            store,
            config,
            prompt: Prompt::new(input, output),
        }
    }

    pub fn into_output(self) -> W {
        self.prompt.into_output()
    }

    /// Runs the main menu until the operator exits or input ends.
    pub fn run(&mut self) -> ConsoleResult<()> {
        info!(store = %self.config.store_name, "Console session started");
        match self.main_menu() {
            Ok(()) | Err(Stop::Eof) => {
                info!("Console session ended");
                Ok(())
            }
            Err(Stop::Io(e)) => Err(e.into()),
        }
    }

    fn main_menu(&mut self) -> MenuResult {
        let title = self.config.store_name.clone();
        loop {
            let choice = self.choose(
                &title,
                &["Customers", "Products", "New sale", "Sales"],
                "Exit",
            )?;
            match choice {
                1 => self.customers_menu()?,
                2 => self.products_menu()?,
                3 => self.new_sale()?,
                4 => self.sales_menu()?,
                0 => return self.prompt.say("Goodbye."),
                _ => self.invalid_option()?,
            }
        }
    }

    /// Prints a numbered menu and reads the choice.
    fn choose(&mut self, title: &str, options: &[&str], exit: &str) -> MenuResult<u32> {
        self.prompt.say("")?;
        self.prompt.say(format!("=== {} ===", title))?;
        for (i, option) in options.iter().enumerate() {
            self.prompt.say(format!("  {}. {}", i + 1, option))?;
        }
        self.prompt.say(format!("  0. {}", exit))?;
        self.prompt.number("Choose an option: ")
    }

    fn invalid_option(&mut self) -> MenuResult {
        self.prompt.say("Invalid option.")
    }

    /// Prints a failed operation; the menu carries on.
    fn report(&mut self, err: impl Into<ConsoleError>) -> MenuResult {
        let err = err.into();
        debug!(code = ?err.code, message = %err.message, "Operation failed");
        self.prompt.say(format!("Error: {}", err))
    }

    fn print_rows(&mut self, empty: &str, rows: Vec<String>) -> MenuResult {
        if rows.is_empty() {
            return self.prompt.say(empty);
        }
        for row in rows {
            self.prompt.say(row)?;
        }
        Ok(())
    }

    fn money(&self, amount: Money) -> String {
        self.config.format_currency(amount.cents())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Runs a scripted session against `store` and returns everything printed.
    pub(crate) fn session(store: &mut Store, script: &str) -> String {
        let config = ConsoleConfig::default();
        let mut console = Console::new(store, &config, Cursor::new(script.as_bytes().to_vec()), Vec::new());
        console.run().unwrap();
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn test_exit_and_eof_end_the_session() {
        let mut store = Store::new();
        let out = session(&mut store, "0\n");
        assert!(out.contains("=== Dreams POS ==="));
        assert!(out.ends_with("Goodbye.\n"));

        let out = session(&mut store, "1\n");
        assert!(out.contains("=== Customers ==="));
        assert!(!out.contains("Goodbye."));
    }

    #[test]
    fn test_invalid_choices_reprompt() {
        let mut store = Store::new();
        let out = session(&mut store, "uno\n9\n0\n");
        assert!(out.contains("'uno' is not a valid number."));
        assert!(out.contains("Invalid option."));
    }
}
