use sea_orm::{entity::prelude::*, ActiveValue::NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::duration;
use crate::errors::ModelError;

/// One logged work session.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "suivi")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub date: Date,
    pub heure_debut: Time,
    pub heure_fin: Time,
    /// Minutes between `heure_debut` and `heure_fin`, derived on every write.
    pub duree: i32,
    pub km: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Validated column values for an insert or a full overwrite.
///
/// Only constructible through [`SuiviFields::new`], so `duree` always
/// matches the time span.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuiviFields {
    date: Date,
    heure_debut: Time,
    heure_fin: Time,
    duree: i32,
    km: i32,
}

impl SuiviFields {
    pub fn new(date: Date, heure_debut: Time, heure_fin: Time, km: i32) -> Result<Self, ModelError> {
        if km < 0 {
            return Err(ModelError::invalid("km", "must not be negative"));
        }
        let duree = duration::duration_minutes(date, heure_debut, heure_fin)?;
        Ok(Self { date, heure_debut, heure_fin, duree, km })
    }

    pub fn date(&self) -> Date { self.date }
    pub fn heure_debut(&self) -> Time { self.heure_debut }
    pub fn heure_fin(&self) -> Time { self.heure_fin }
    pub fn duree(&self) -> i32 { self.duree }
    pub fn km(&self) -> i32 { self.km }

    /// Every non-key column set, id left unset: an insert lets the database
    /// assign it, an `update_many` keeps the filtered row's id.
    pub fn to_new_active_model(&self) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            date: Set(self.date),
            heure_debut: Set(self.heure_debut),
            heure_fin: Set(self.heure_fin),
            duree: Set(self.duree),
            km: Set(self.km),
        }
    }

    /// The row these fields would produce under `id`.
    pub fn into_model(self, id: i32) -> Model {
        Model {
            id,
            date: self.date,
            heure_debut: self.heure_debut,
            heure_fin: self.heure_fin,
            duree: self.duree,
            km: self.km,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duration::{parse_date, parse_time};

    #[test]
    fn fields_derive_duration_and_fill_every_column() {
        let f = SuiviFields::new(
            parse_date("date", "2024-03-05").unwrap(),
            parse_time("heure_debut", "16:30").unwrap(),
            parse_time("heure_fin", "18:45").unwrap(),
            42,
        )
        .unwrap();
        assert_eq!(f.duree(), 135);

        let am = f.to_new_active_model();
        assert!(am.id.is_not_set());
        assert_eq!(am.duree, Set(135));
        assert_eq!(am.km, Set(42));

        let m = f.into_model(7);
        assert_eq!(m.id, 7);
        assert_eq!(m.duree, 135);
    }

    #[test]
    fn negative_km_is_rejected() {
        let err = SuiviFields::new(
            parse_date("date", "2024-03-05").unwrap(),
            parse_time("heure_debut", "08:00").unwrap(),
            parse_time("heure_fin", "09:00").unwrap(),
            -1,
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::Validation(ref m) if m.starts_with("km")));
    }
}
