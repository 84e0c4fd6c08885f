use crate::utils::error::{FleetError, Result};
use crate::utils::format::{fixed_half_up, money};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BoatType {
    Sailing,
    Power,
}

impl BoatType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoatType::Sailing => "SAILING",
            BoatType::Power => "POWER",
        }
    }
}

impl fmt::Display for BoatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for BoatType {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "SAILING" => Ok(BoatType::Sailing),
            "POWER" => Ok(BoatType::Power),
            _ => Err(FleetError::boat_parse(format!("unknown boat type '{}'", s))),
        }
    }
}

/// Result of asking a boat to accrue an expense.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExpenseOutcome {
    /// The expense was recorded; `total` is the new cumulative spend.
    Authorized { total: f64 },
    /// Nothing changed; `allowance` is what may still be spent.
    Refused { allowance: f64 },
}

impl ExpenseOutcome {
    pub fn is_authorized(&self) -> bool {
        matches!(self, ExpenseOutcome::Authorized { .. })
    }

    /// Collapses the outcome into the historical single-number return:
    /// the new total when authorized, the remaining allowance otherwise.
    pub fn legacy_value(&self) -> f64 {
        match *self {
            ExpenseOutcome::Authorized { total } => total,
            ExpenseOutcome::Refused { allowance } => allowance,
        }
    }
}

/// One boat in the fleet. Everything but `expenses` is fixed at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Boat {
    boat_type: BoatType,
    name: String,
    year: i32,
    make_model: String,
    length: f64,
    price: f64,
    expenses: f64,
}

impl Boat {
    pub fn new(
        boat_type: BoatType,
        name: impl Into<String>,
        year: i32,
        make_model: impl Into<String>,
        length: f64,
        price: f64,
    ) -> Self {
        Self {
            boat_type,
            name: name.into(),
            year,
            make_model: make_model.into(),
            length,
            price,
            expenses: 0.0,
        }
    }

    /// Rebuilds a boat that already carries expenses, rejecting states that
    /// break `0 <= expenses <= price`.
    pub fn with_expenses(mut self, expenses: f64) -> Result<Self> {
        if !expenses.is_finite() || expenses < 0.0 || expenses > self.price {
            return Err(FleetError::decode(format!(
                "boat '{}' has expenses {} outside 0..={}",
                self.name, expenses, self.price
            )));
        }
        self.expenses = expenses;
        Ok(self)
    }

    /// Parses one `TYPE,NAME,YEAR,MAKEMODEL,LENGTH,PRICE` line.
    pub fn parse_text(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split(',').collect();
        let &[boat_type, name, year, make_model, length, price] = fields.as_slice() else {
            return Err(FleetError::boat_parse(format!(
                "expected 6 fields, found {}",
                fields.len()
            )));
        };

        let boat_type: BoatType = boat_type.parse()?;
        if name.is_empty() {
            return Err(FleetError::boat_parse("boat name is empty"));
        }
        let year: i32 = year
            .parse()
            .map_err(|_| FleetError::boat_parse(format!("year '{}' is not an integer", year)))?;
        let length = parse_real("length", length)?;
        let price = parse_real("price", price)?;
        if price < 0.0 {
            return Err(FleetError::boat_parse(format!("price {} is negative", price)));
        }

        Ok(Self::new(boat_type, name, year, make_model, length, price))
    }

    pub fn boat_type(&self) -> BoatType {
        self.boat_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn make_model(&self) -> &str {
        &self.make_model
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn expenses(&self) -> f64 {
        self.expenses
    }

    pub fn allowance(&self) -> f64 {
        self.price - self.expenses
    }

    /// Case-insensitive identity check used by every fleet lookup.
    pub fn is_named(&self, name: &str) -> bool {
        self.name
            .chars()
            .flat_map(char::to_lowercase)
            .eq(name.chars().flat_map(char::to_lowercase))
    }

    pub(crate) fn add_expense(&mut self, amount: f64) -> ExpenseOutcome {
        let allowance = self.allowance();
        if !amount.is_finite() || amount < 0.0 || amount > allowance {
            return ExpenseOutcome::Refused { allowance };
        }
        self.expenses += amount;
        ExpenseOutcome::Authorized {
            total: self.expenses,
        }
    }

    /// Fixed-width report line.
    pub fn render(&self) -> String {
        format!(
            "{:<8} {:<20} {:>4} {:<12} {:>3}' : Paid $ {:>8} : Spent $ {:>8}",
            self.boat_type.as_str(),
            self.name,
            self.year,
            self.make_model,
            fixed_half_up(self.length, 0),
            money(self.price),
            money(self.expenses)
        )
    }
}

impl fmt::Display for Boat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn parse_real(field: &str, raw: &str) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| FleetError::boat_parse(format!("{} '{}' is not a number", field, raw)))?;
    if !value.is_finite() {
        return Err(FleetError::boat_parse(format!("{} '{}' is not finite", field, raw)));
    }
    Ok(value)
}
