// crates/gb2260-core/src/api.rs
use crate::code::Level;
use crate::division::Division;
use crate::error::Result;
use serde::Serialize;

/// Flat, serialisable snapshot of a [`Division`] and its hierarchy.
///
/// Used for JSON output where a live handle cannot be serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DivisionView {
    pub code: String,
    pub name: String,
    pub level: Level,
    /// Names from the province down to this division.
    pub path: Vec<String>,
}

impl DivisionView {
    pub fn from_division(d: &Division) -> Result<Self> {
        let path = d
            .stack()
            .map(|level| level.map(|l| l.name().to_owned()))
            .collect::<Result<Vec<_>>>()?;
        Ok(DivisionView {
            code: d.code().to_owned(),
            name: d.name().to_owned(),
            level: d.level(),
            path,
        })
    }
}

impl TryFrom<&Division> for DivisionView {
    type Error = crate::error::GbError;

    fn try_from(d: &Division) -> Result<Self> {
        DivisionView::from_division(d)
    }
}
