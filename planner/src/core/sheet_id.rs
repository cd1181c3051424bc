//! Spreadsheet id validation

use regex::Regex;

use crate::error::{PlannerError, PlannerResult};

/// Accepts ids that are safe to splice into an export URL path
#[derive(Clone, Debug)]
pub struct SheetIdValidator {
    pattern: Regex,
}

impl SheetIdValidator {
    pub const PATTERN: &'static str = r"^[A-Za-z0-9_-]+$";

    pub fn new() -> PlannerResult<Self> {
        let pattern = Regex::new(Self::PATTERN)
            .map_err(|e| PlannerError::config(format!("Invalid sheet id pattern: {e}")))?;
        Ok(Self { pattern })
    }

    /// Return the id unchanged if it is well formed
    pub fn validate<'a>(&self, sheet_id: Option<&'a str>) -> PlannerResult<&'a str> {
        match sheet_id {
            None | Some("") => Err(PlannerError::invalid("Missing sheetId parameter")),
            Some(id) if self.pattern.is_match(id) => Ok(id),
            Some(_) => Err(PlannerError::invalid("Invalid sheetId format")),
        }
    }
}
