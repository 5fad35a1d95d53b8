// crates/gb2260-core/src/code.rs

//! # Division Codes
//!
//! Canonical parsing of "code-like" input. A GB/T 2260 code is six decimal
//! digits: two for the province, two for the prefecture, two for the county.
//! Trailing `00` groups denote a coarser level.

use crate::error::{GbError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A parsed division code, stored as its integer key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DivisionCode(u32);

/// The three granularities encoded positionally in a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Province,
    Prefecture,
    County,
}

impl DivisionCode {
    #[inline]
    pub const fn new(key: u32) -> Self {
        DivisionCode(key)
    }

    /// The integer key used by the dataset.
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Code with positions 3–6 replaced by `0000`.
    #[inline]
    pub const fn province_code(self) -> DivisionCode {
        DivisionCode(self.0 / 10_000 * 10_000)
    }

    /// Code with positions 5–6 replaced by `00`.
    #[inline]
    pub const fn prefecture_code(self) -> DivisionCode {
        DivisionCode(self.0 / 100 * 100)
    }

    #[inline]
    pub const fn is_province_code(self) -> bool {
        self.0 == self.province_code().0
    }

    /// `true` for `XXYY00` codes that are not provinces.
    #[inline]
    pub const fn is_prefecture_code(self) -> bool {
        !self.is_province_code() && self.0 == self.prefecture_code().0
    }

    pub const fn level(self) -> Level {
        if self.is_province_code() {
            Level::Province
        } else if self.is_prefecture_code() {
            Level::Prefecture
        } else {
            Level::County
        }
    }
}

impl fmt::Display for DivisionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06}", self.0)
    }
}

impl From<u32> for DivisionCode {
    fn from(key: u32) -> Self {
        DivisionCode(key)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::Province => "province",
            Level::Prefecture => "prefecture",
            Level::County => "county",
        };
        f.write_str(s)
    }
}

/// Anything that can name a division: integers, numeric strings or an
/// already parsed [`DivisionCode`].
///
/// Both `get` and `search` normalize their input through this trait, so
/// `110105`, `"110105"` and `String::from(" 110105 ")` are interchangeable.
///
/// # Examples
/// ```rust
/// use gb2260_core::code::CodeLike;
///
/// assert_eq!("110105".to_code().unwrap().as_u32(), 110105);
/// assert_eq!(110105u32.to_code().unwrap().to_string(), "110105");
/// assert!("11a105".to_code().is_err());
///
/// // Prefixes stay textual: "11" is not padded.
/// assert_eq!("11".to_prefix(), "11");
/// ```
pub trait CodeLike {
    /// Parse into the canonical integer key.
    ///
    /// Fails with [`GbError::InvalidCode`] when the input is not a
    /// non-negative decimal number that fits the key type.
    fn to_code(&self) -> Result<DivisionCode>;

    /// The textual form used for prefix comparison in search.
    fn to_prefix(&self) -> String;
}

impl CodeLike for DivisionCode {
    fn to_code(&self) -> Result<DivisionCode> {
        Ok(*self)
    }

    fn to_prefix(&self) -> String {
        self.to_string()
    }
}

impl CodeLike for str {
    fn to_code(&self) -> Result<DivisionCode> {
        let s = self.trim();
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(GbError::InvalidCode(self.to_owned()));
        }
        s.parse::<u32>()
            .map(DivisionCode)
            .map_err(|_| GbError::InvalidCode(self.to_owned()))
    }

    fn to_prefix(&self) -> String {
        self.trim().to_owned()
    }
}

impl CodeLike for String {
    fn to_code(&self) -> Result<DivisionCode> {
        self.as_str().to_code()
    }

    fn to_prefix(&self) -> String {
        self.as_str().to_prefix()
    }
}

impl<T: CodeLike + ?Sized> CodeLike for &T {
    fn to_code(&self) -> Result<DivisionCode> {
        (**self).to_code()
    }

    fn to_prefix(&self) -> String {
        (**self).to_prefix()
    }
}

macro_rules! impl_code_like_int {
    ($($t:ty),*) => {
        $(
            impl CodeLike for $t {
                fn to_code(&self) -> Result<DivisionCode> {
                    u32::try_from(*self)
                        .map(DivisionCode)
                        .map_err(|_| GbError::InvalidCode(self.to_string()))
                }

                fn to_prefix(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_code_like_int!(u32, u64, usize, i32, i64);
