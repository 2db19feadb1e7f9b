//! Facility record and row mapping.

use rusqlite::types::ValueRef;
use rusqlite::Row;

/// Tokens that mark a facility as included in the pass.
const AFFIRMATIVE_ASCII: &str = "yes";
const AFFIRMATIVE_KO: &str = "예";

/// One venue row from the facilities table.
///
/// Every field is optional: a column missing from the table and a `NULL`
/// value both read as `None`. Placeholders are applied at render time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facility {
    pub name_ko: Option<String>,
    pub name_en: Option<String>,
    pub category: Option<String>,
    pub region: Option<String>,
    pub address: Option<String>,
    /// Pass status as stored ("yes", "예", or anything else).
    pub included: Option<String>,
    pub open_days: Option<String>,
    pub open_hours: Option<String>,
    pub last_entry: Option<String>,
    pub reservation: Option<String>,
    pub qr_pass: Option<String>,
    pub cost_original: Option<String>,
    pub notes: Option<String>,
    pub caution: Option<String>,
}

impl Facility {
    /// Whether the facility is covered by the pass.
    ///
    /// Only `"yes"` (any case) and `"예"` count; missing values are `false`.
    pub fn is_included(&self) -> bool {
        self.included.as_deref().is_some_and(is_affirmative)
    }

    /// Build a facility from a row of `SELECT *`, matching columns by name.
    ///
    /// `columns` must be the statement's column names, lowercased, in order.
    pub(crate) fn from_row(row: &Row<'_>, columns: &[String]) -> Result<Self, rusqlite::Error> {
        let mut facility = Facility::default();
        for (idx, column) in columns.iter().enumerate() {
            if let Some(slot) = facility.field_mut(column) {
                *slot = value_to_text(row.get_ref(idx)?);
            }
        }
        Ok(facility)
    }

    fn field_mut(&mut self, column: &str) -> Option<&mut Option<String>> {
        let slot = match column {
            "name_ko" => &mut self.name_ko,
            "name_en" => &mut self.name_en,
            "category" => &mut self.category,
            "region" => &mut self.region,
            "address" => &mut self.address,
            "included" => &mut self.included,
            "open_days" => &mut self.open_days,
            "open_hours" => &mut self.open_hours,
            "last_entry" => &mut self.last_entry,
            "reservation" => &mut self.reservation,
            "qr_pass" => &mut self.qr_pass,
            "cost_original" => &mut self.cost_original,
            "notes" => &mut self.notes,
            "caution" => &mut self.caution,
            _ => return None,
        };
        Some(slot)
    }
}

fn is_affirmative(value: &str) -> bool {
    value.to_lowercase() == AFFIRMATIVE_ASCII || value == AFFIRMATIVE_KO
}

/// Render any SQLite value as display text; `NULL` is absent.
fn value_to_text(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Some(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}
