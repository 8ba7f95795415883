use chrono::NaiveDate;

use crate::duration::parse_date;
use crate::errors::ModelError;

/// Inclusive date bounds for listing; either side may be open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateRange {
    pub debut: Option<NaiveDate>,
    pub fin: Option<NaiveDate>,
}

impl DateRange {
    pub fn all() -> Self {
        Self::default()
    }

    /// Parse query-string bounds; blank values count as absent.
    pub fn parse(debut: Option<&str>, fin: Option<&str>) -> Result<Self, ModelError> {
        let bound = |field: &str, raw: Option<&str>| {
            raw.filter(|s| !s.trim().is_empty())
                .map(|s| parse_date(field, s))
                .transpose()
        };
        let range = Self { debut: bound("debut", debut)?, fin: bound("fin", fin)? };
        if let (Some(d), Some(f)) = (range.debut, range.fin) {
            if d > f {
                return Err(ModelError::Validation(format!("debut ({d}) is after fin ({f})")));
            }
        }
        Ok(range)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.debut.map_or(true, |d| date >= d) && self.fin.map_or(true, |f| date <= f)
    }
}
