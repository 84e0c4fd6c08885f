use crate::core::database::{self, DATABASE_FILE};
use crate::core::terminal::Terminal;
use crate::domain::{Boat, Fleet, Storage};
use crate::utils::error::Result;
use crate::utils::format::money;
use std::io::{BufRead, Write};

const MENU: &str = "\n(P)rint, (A)dd, (R)emove, (E)xpense, e(X)it : ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Interactive driver: loads a fleet, runs the menu until exit, then
/// persists the fleet back to the database.
pub struct Session<S, R, W, E> {
    storage: S,
    terminal: Terminal<R, W, E>,
    database_path: String,
    fleet: Fleet,
}

impl<S: Storage, R: BufRead, W: Write, E: Write> Session<S, R, W, E> {
    pub fn new(storage: S, terminal: Terminal<R, W, E>) -> Self {
        Self {
            storage,
            terminal,
            database_path: DATABASE_FILE.to_string(),
            fleet: Fleet::new(),
        }
    }

    pub fn with_database_path(mut self, database_path: impl Into<String>) -> Self {
        self.database_path = database_path.into();
        self
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Runs a whole session. Storage problems are reported and survived;
    /// only a failing terminal stream ends the session with an error.
    pub fn start(&mut self, import_path: Option<&str>) -> Result<()> {
        match import_path {
            Some(path) => self.load_from_text(path)?,
            None => self.load_from_database()?,
        }

        loop {
            self.terminal.say(MENU)?;
            let Some(line) = self.terminal.read_line()? else {
                tracing::debug!("Input closed, leaving menu");
                break;
            };
            if self.handle_menu_option(&line)? == Flow::Exit {
                break;
            }
        }

        self.save_to_database()?;
        self.terminal.say("Exiting the Fleet Management System")
    }

    fn load_from_text(&mut self, path: &str) -> Result<()> {
        let mut fleet = Fleet::new();
        let loaded = fleet.load_from_text(&self.storage, path);
        self.fleet = fleet;
        match loaded {
            Ok(_) => self.terminal.say("Fleet data loaded from CSV file."),
            Err(e) => {
                tracing::debug!("Import of {} failed: {}", path, e);
                self.terminal
                    .complain("ERROR: Failed to load fleet data from CSV file.")
            }
        }
    }

    fn load_from_database(&mut self) -> Result<()> {
        match database::load(&self.storage, &self.database_path) {
            Ok(fleet) => {
                self.fleet = fleet;
                self.terminal.say("Fleet data loaded from database.")
            }
            Err(e) => {
                tracing::debug!("No usable database at {}: {}", self.database_path, e);
                self.fleet = Fleet::new();
                self.terminal
                    .say("No existing fleet data found. Starting fresh.")
            }
        }
    }

    fn save_to_database(&mut self) -> Result<()> {
        match database::save(&self.storage, &self.database_path, &self.fleet) {
            Ok(()) => self.terminal.say("Fleet data saved to database."),
            Err(e) => {
                tracing::debug!("Saving to {} failed: {}", self.database_path, e);
                self.terminal.complain("ERROR: Failed to save fleet data.")
            }
        }
    }

    fn handle_menu_option(&mut self, line: &str) -> Result<Flow> {
        let option = line.chars().next().and_then(|c| c.to_uppercase().next());
        tracing::debug!("Menu option {:?}", option);

        match option {
            Some('P') => {
                let report = self.fleet.generate_report();
                self.terminal.say(&report)?;
                Ok(Flow::Continue)
            }
            Some('A') => self.add_boat(),
            Some('R') => self.remove_boat(),
            Some('E') => self.manage_expense(),
            Some('X') => Ok(Flow::Exit),
            _ => {
                self.terminal.say("Invalid menu option, try again.")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn add_boat(&mut self) -> Result<Flow> {
        let Some(line) = self.terminal.prompt("Please enter the new boat CSV data: ")? else {
            return Ok(Flow::Exit);
        };
        if self.fleet.add_boat_from_text(&line) {
            self.terminal.say("Boat added successfully.")?;
        } else {
            self.terminal.say("Failed to add boat. Check your input.")?;
        }
        Ok(Flow::Continue)
    }

    fn remove_boat(&mut self) -> Result<Flow> {
        let Some(name) = self.terminal.prompt("Which boat do you want to remove? : ")? else {
            return Ok(Flow::Exit);
        };
        if self.fleet.remove_boat(&name) {
            self.terminal.say("Boat removed successfully.")?;
        } else {
            self.terminal.say(&format!("Cannot find boat {}", name))?;
        }
        Ok(Flow::Continue)
    }

    fn manage_expense(&mut self) -> Result<Flow> {
        let Some(name) = self.terminal.prompt("Which boat do you want to spend on? : ")? else {
            return Ok(Flow::Exit);
        };
        if !self.fleet.boat_exists(&name) {
            self.terminal.say(&format!("Cannot find boat {}.", name))?;
            return Ok(Flow::Continue);
        }

        let Some(line) = self.terminal.prompt("How much do you want to spend?      : ")? else {
            return Ok(Flow::Exit);
        };
        let Some(amount) = parse_amount(&line) else {
            self.terminal.say("Invalid expense amount.")?;
            return Ok(Flow::Continue);
        };

        let allowance = self.fleet.get_remaining_allowance(&name);
        if allowance >= amount {
            if self.fleet.add_expense(&name, amount, self.terminal.out())? {
                let total = self
                    .fleet
                    .find_boat_by_name(&name)
                    .map(Boat::expenses)
                    .unwrap_or_default();
                self.terminal
                    .say(&format!("Expense authorized, ${}.", money(total)))?;
            }
        } else {
            self.terminal.say(&format!(
                "Expense not permitted, only ${} left to spend.",
                money(allowance)
            ))?;
        }
        Ok(Flow::Continue)
    }
}

/// First token of the line as a non-negative amount; the rest is ignored.
fn parse_amount(line: &str) -> Option<f64> {
    line.split_whitespace()
        .next()?
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount >= 0.0)
}
