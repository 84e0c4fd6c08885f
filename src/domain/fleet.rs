use crate::domain::model::{Boat, ExpenseOutcome};
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use crate::utils::format::money;
use std::io::Write;

/// Ordered collection of boats. Names act as identity but are not unique:
/// lookups return the earliest match and removal drops every match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fleet {
    boats: Vec<Boat>,
}

impl Fleet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_boats(boats: Vec<Boat>) -> Self {
        Self { boats }
    }

    pub fn boats(&self) -> &[Boat] {
        &self.boats
    }

    pub fn len(&self) -> usize {
        self.boats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boats.is_empty()
    }

    /// Reads an import file through `storage` and adds every line that
    /// parses. Only failing to read the file itself is an error.
    pub fn load_from_text<S: Storage>(&mut self, storage: &S, path: &str) -> Result<usize> {
        let data = storage.read_file(path)?;
        let added = self.load_from_bytes(&data);
        tracing::info!("Imported {} boats from {}", added, path);
        Ok(added)
    }

    /// Import content is split on `\n`; each line is decoded lossily so a
    /// stray byte only costs the line it sits on.
    pub fn load_from_bytes(&mut self, data: &[u8]) -> usize {
        data.split(|byte| *byte == b'\n')
            .map(String::from_utf8_lossy)
            .filter(|line| self.add_boat_from_text(line.trim_end_matches('\r')))
            .count()
    }

    pub fn add_boat_from_text(&mut self, line: &str) -> bool {
        if line.is_empty() {
            return false;
        }
        match Boat::parse_text(line) {
            Ok(boat) => {
                tracing::debug!("Added boat '{}'", boat.name());
                self.boats.push(boat);
                true
            }
            Err(e) => {
                tracing::debug!("Skipping line {:?}: {}", line, e);
                false
            }
        }
    }

    pub fn add_boat(&mut self, boat: Boat) {
        self.boats.push(boat);
    }

    pub fn remove_boat(&mut self, name: &str) -> bool {
        let before = self.boats.len();
        self.boats.retain(|boat| !boat.is_named(name));
        let removed = before - self.boats.len();
        if removed > 1 {
            tracing::debug!("Removed {} boats sharing the name '{}'", removed, name);
        }
        removed > 0
    }

    pub fn find_boat_by_name(&self, name: &str) -> Option<&Boat> {
        self.boats.iter().find(|boat| boat.is_named(name))
    }

    pub fn boat_exists(&self, name: &str) -> bool {
        self.find_boat_by_name(name).is_some()
    }

    /// `price - expenses` for the named boat, or `-1.0` when there is none.
    pub fn get_remaining_allowance(&self, name: &str) -> f64 {
        self.find_boat_by_name(name)
            .map(Boat::allowance)
            .unwrap_or(-1.0)
    }

    /// Applies an expense to the first boat with this name. `None` means no
    /// such boat.
    pub fn record_expense(&mut self, name: &str, amount: f64) -> Option<ExpenseOutcome> {
        let boat = self.boats.iter_mut().find(|boat| boat.is_named(name))?;
        let outcome = boat.add_expense(amount);
        tracing::debug!("Expense {:.2} on '{}': {:?}", amount, boat.name(), outcome);
        Some(outcome)
    }

    /// Like [`Fleet::record_expense`], but reports a refusal on `out` and
    /// collapses the outcome to whether the expense was recorded.
    pub fn add_expense<W: Write>(&mut self, name: &str, amount: f64, out: &mut W) -> Result<bool> {
        match self.record_expense(name, amount) {
            None => Ok(false),
            Some(ExpenseOutcome::Authorized { .. }) => Ok(true),
            Some(ExpenseOutcome::Refused { allowance }) => {
                writeln!(
                    out,
                    "Expense not permitted, only ${} left to spend.",
                    money(allowance)
                )?;
                Ok(false)
            }
        }
    }

    pub fn total_price(&self) -> f64 {
        self.boats.iter().fold(0.0, |total, boat| total + boat.price())
    }

    pub fn total_expenses(&self) -> f64 {
        self.boats.iter().fold(0.0, |total, boat| total + boat.expenses())
    }

    pub fn generate_report(&self) -> String {
        let mut report = String::from("Fleet report:\n");
        for boat in &self.boats {
            report.push_str(&boat.render());
            report.push('\n');
        }
        report.push_str(&format!(
            "Total : Paid $ {} : Spent $ {}\n",
            money(self.total_price()),
            money(self.total_expenses())
        ));
        report
    }
}
