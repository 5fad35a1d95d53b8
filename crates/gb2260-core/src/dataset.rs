// crates/gb2260-core/src/dataset.rs
use crate::code::{DivisionCode, Level};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The merged code table of every revision.
///
/// Codes are never removed between revisions, only added or renamed, so one
/// flat table is enough for cross-revision search. The table is ordered by
/// code, which makes iteration (and therefore search output) ascending.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    entries: BTreeMap<u32, String>,
}

/// Simple aggregate statistics for the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetStats {
    pub total: usize,
    pub provinces: usize,
    pub prefectures: usize,
    pub counties: usize,
}

impl Dataset {
    /// Builds a dataset from `(code, name)` pairs. Later pairs win.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (u32, S)>,
        S: Into<String>,
    {
        Dataset {
            entries: entries
                .into_iter()
                .map(|(code, name)| (code, name.into()))
                .collect(),
        }
    }

    pub fn name_of(&self, code: DivisionCode) -> Option<&str> {
        self.entries.get(&code.as_u32()).map(String::as_str)
    }

    pub fn contains(&self, code: DivisionCode) -> bool {
        self.entries.contains_key(&code.as_u32())
    }

    /// All records in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = (DivisionCode, &str)> + '_ {
        self.entries
            .iter()
            .map(|(code, name)| (DivisionCode::new(*code), name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> DatasetStats {
        let mut stats = DatasetStats {
            total: self.entries.len(),
            provinces: 0,
            prefectures: 0,
            counties: 0,
        };
        for (code, _) in self.iter() {
            match code.level() {
                Level::Province => stats.provinces += 1,
                Level::Prefecture => stats.prefectures += 1,
                Level::County => stats.counties += 1,
            }
        }
        stats
    }

    /// Overlays `other` on top of `self`; codes present in both take the
    /// name from `other`.
    pub fn merge(&mut self, other: Dataset) {
        self.entries.extend(other.entries);
    }
}

impl FromIterator<(u32, String)> for Dataset {
    fn from_iter<T: IntoIterator<Item = (u32, String)>>(iter: T) -> Self {
        Dataset::from_entries(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iteration_is_ascending() {
        let ds = Dataset::from_entries([(110105, "朝阳区"), (110000, "北京市"), (110100, "市辖区")]);
        let codes: Vec<u32> = ds.iter().map(|(c, _)| c.as_u32()).collect();
        assert_eq!(codes, vec![110000, 110100, 110105]);
    }

    #[test]
    fn collects_from_parsed_pairs() {
        let ds: Dataset = vec![(110000, "北京市".to_owned()), (110105, "朝阳区".to_owned())]
            .into_iter()
            .collect();
        assert_eq!(ds.len(), 2);
        assert!(ds.contains(DivisionCode::new(110105)));
        assert!(!ds.contains(DivisionCode::new(110106)));
    }

    #[test]
    fn later_entries_and_merges_override() {
        let mut ds = Dataset::from_entries([(130602, "新市区"), (130602, "竞秀区")]);
        assert_eq!(ds.name_of(DivisionCode::new(130602)), Some("竞秀区"));

        ds.merge(Dataset::from_entries([(130602, "其他"), (130606, "莲池区")]));
        assert_eq!(ds.name_of(DivisionCode::new(130602)), Some("其他"));
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn stats_count_levels() {
        let ds = Dataset::from_entries([
            (110000, "北京市"),
            (110100, "市辖区"),
            (110105, "朝阳区"),
            (110106, "丰台区"),
        ]);
        assert_eq!(
            ds.stats(),
            DatasetStats {
                total: 4,
                provinces: 1,
                prefectures: 1,
                counties: 2
            }
        );
    }
}
