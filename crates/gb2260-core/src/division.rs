// crates/gb2260-core/src/division.rs
use crate::code::{DivisionCode, Level};
use crate::error::Result;
use crate::resolver::Shared;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::sync::Arc;

/// The administrative division.
///
/// A cheap, cloneable handle to an identity-cached record. Equality, ordering
/// and hashing are by code only, so two handles of the same code compare
/// equal even across resolvers; [`Division::ptr_eq`] tests instance
/// identity.
///
/// Hierarchy is derived from the code: the province is `XX0000`, the
/// prefecture `XXYY00`, and anything else is a county-level unit.
#[derive(Clone)]
pub struct Division(Arc<Node>);

pub(crate) struct Node {
    code: DivisionCode,
    code_str: String,
    name: String,
    shared: Arc<Shared>,
}

impl Node {
    pub(crate) fn new(code: DivisionCode, name: String, shared: Arc<Shared>) -> Self {
        Node {
            code,
            code_str: code.to_string(),
            name,
            shared,
        }
    }
}

impl Division {
    pub(crate) fn from_node(node: Arc<Node>) -> Self {
        Division(node)
    }

    #[cfg(test)]
    pub(crate) fn as_ptr(&self) -> *const () {
        Arc::as_ptr(&self.0).cast()
    }

    /// The six-digit code, e.g. `"110105"`.
    pub fn code(&self) -> &str {
        &self.0.code_str
    }

    pub fn division_code(&self) -> DivisionCode {
        self.0.code
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn level(&self) -> Level {
        self.0.code.level()
    }

    /// `true` if both handles point at the same cached instance.
    pub fn ptr_eq(a: &Division, b: &Division) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    /// The province this division belongs to (itself for provinces).
    ///
    /// # Errors
    ///
    /// `InvalidCode` if the derived `XX0000` code is missing from the dataset.
    pub fn province(&self) -> Result<Division> {
        self.0.shared.get(self.0.code.province_code())
    }

    pub fn is_province(&self) -> bool {
        self.0.code.is_province_code()
    }

    /// The prefecture, or `None` for a province.
    ///
    /// # Errors
    ///
    /// `InvalidCode` if the derived `XXYY00` code is missing from the dataset.
    pub fn prefecture(&self) -> Result<Option<Division>> {
        if self.is_province() {
            return Ok(None);
        }
        self.0.shared.get(self.0.code.prefecture_code()).map(Some)
    }

    pub fn is_prefecture(&self) -> bool {
        self.0.code.is_prefecture_code()
    }

    /// The division itself if it is county-level, otherwise `None`.
    pub fn county(&self) -> Option<Division> {
        if self.is_province() || self.is_prefecture() {
            None
        } else {
            Some(self.clone())
        }
    }

    pub fn is_county(&self) -> bool {
        !self.is_province() && !self.is_prefecture()
    }

    /// Path from the province down to this division.
    ///
    /// Yields the province, then the prefecture for prefecture- and
    /// county-level divisions, then the division itself for counties.
    /// The iterator is lazy; clone it (or call `stack` again) to restart.
    ///
    /// ```rust
    /// use gb2260_core::{Dataset, Resolver};
    ///
    /// let resolver = Resolver::new(Dataset::from_entries([
    ///     (110000, "北京市"),
    ///     (110100, "市辖区"),
    ///     (110105, "朝阳区"),
    /// ]));
    /// let names: Vec<String> = resolver
    ///     .get(110105)
    ///     .unwrap()
    ///     .stack()
    ///     .map(|d| d.map(|d| d.name().to_owned()))
    ///     .collect::<Result<_, _>>()
    ///     .unwrap();
    /// assert_eq!(names, ["北京市", "市辖区", "朝阳区"]);
    /// ```
    pub fn stack(&self) -> Stack {
        Stack {
            division: self.clone(),
            step: 0,
        }
    }

    /// [`Division::stack`] collected into a vector.
    pub fn path(&self) -> Result<Vec<Division>> {
        self.stack().collect()
    }
}

/// Iterator returned by [`Division::stack`].
#[derive(Clone)]
pub struct Stack {
    division: Division,
    step: u8,
}

impl Stack {
    fn depth(&self) -> u8 {
        match self.division.level() {
            Level::Province => 1,
            Level::Prefecture => 2,
            Level::County => 3,
        }
    }
}

impl Iterator for Stack {
    type Item = Result<Division>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.step >= self.depth() {
            return None;
        }
        let item = match self.step {
            0 => self.division.province(),
            1 => self
                .division
                .0
                .shared
                .get(self.division.0.code.prefecture_code()),
            _ => Ok(self.division.clone()),
        };
        self.step += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = usize::from(self.depth().saturating_sub(self.step));
        (left, Some(left))
    }
}

impl ExactSizeIterator for Stack {}
impl FusedIterator for Stack {}

impl PartialEq for Division {
    fn eq(&self, other: &Self) -> bool {
        self.0.code == other.0.code
    }
}

impl Eq for Division {}

impl Hash for Division {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.code.hash(state);
    }
}

impl PartialOrd for Division {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Division {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.code.cmp(&other.0.code)
    }
}

impl fmt::Debug for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gb2260::get({:?})", self.code())
    }
}

/// `<GB2260 110105 北京市/市辖区/朝阳区>`
///
/// Levels whose derived code is missing from the dataset are left out.
impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<GB2260 {} ", self.code())?;
        let mut first = true;
        for level in self.stack().flatten() {
            if !first {
                f.write_str("/")?;
            }
            f.write_str(level.name())?;
            first = false;
        }
        f.write_str(">")
    }
}
