//! Unvalidated request payload for create and update.

use serde::{Deserialize, Serialize};

use crate::duration::{parse_date, parse_time};
use crate::errors::ModelError;
use crate::suivi::SuiviFields;

/// Distance as sent by clients: HTML form inputs submit numbers as strings.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawKm {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawKm {
    fn is_blank(&self) -> bool {
        matches!(self, RawKm::Text(s) if s.trim().is_empty())
    }

    fn to_km(&self) -> Result<i32, ModelError> {
        let value = match self {
            RawKm::Int(n) => *n,
            RawKm::Float(f) if f.fract() == 0.0 && f.is_finite() => *f as i64,
            RawKm::Float(f) => return Err(ModelError::invalid("km", format!("expected a whole number, got {f}"))),
            RawKm::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| ModelError::invalid("km", format!("expected a whole number, got {s:?}")))?,
        };
        if value < 0 {
            return Err(ModelError::invalid("km", "must not be negative"));
        }
        i32::try_from(value).map_err(|_| ModelError::invalid("km", "out of range"))
    }
}

impl From<i64> for RawKm {
    fn from(n: i64) -> Self { RawKm::Int(n) }
}

/// Body of `POST /ajouter` and `PUT /modifier/{id}`.
///
/// Every field is optional at the wire level so that missing values
/// become a validation error listing them, not a deserialization failure.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct SuiviDraft {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub heure_debut: Option<String>,
    #[serde(default)]
    pub heure_fin: Option<String>,
    #[serde(default)]
    pub km: Option<RawKm>,
}

fn present(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.trim().is_empty())
}

impl SuiviDraft {
    pub fn new(date: &str, heure_debut: &str, heure_fin: &str, km: impl Into<RawKm>) -> Self {
        Self {
            date: Some(date.to_string()),
            heure_debut: Some(heure_debut.to_string()),
            heure_fin: Some(heure_fin.to_string()),
            km: Some(km.into()),
        }
    }

    /// Check presence of all four fields, parse them, and derive `duree`.
    pub fn validate(&self) -> Result<SuiviFields, ModelError> {
        let date = present(&self.date);
        let debut = present(&self.heure_debut);
        let fin = present(&self.heure_fin);
        let km = self.km.as_ref().filter(|k| !k.is_blank());

        let (Some(date), Some(debut), Some(fin), Some(km)) = (date, debut, fin, km) else {
            let missing = [
                ("date", date.is_none()),
                ("heure_debut", debut.is_none()),
                ("heure_fin", fin.is_none()),
                ("km", km.is_none()),
            ]
            .into_iter()
            .filter_map(|(name, absent)| absent.then_some(name))
            .collect();
            return Err(ModelError::MissingFields(missing));
        };

        SuiviFields::new(
            parse_date("date", date)?,
            parse_time("heure_debut", debut)?,
            parse_time("heure_fin", fin)?,
            km.to_km()?,
        )
    }
}
