//! Identifiers and round records shared by both sides of the market.

use std::fmt;

/// Index of a student in the market registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StudentId(pub usize);

/// Index of a university in the market registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UniversityId(pub usize);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

impl fmt::Display for UniversityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U{}", self.0)
    }
}

/// An admission offer held by a student.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offer {
    pub university: UniversityId,
    pub aid: f64,
}

/// A university's decision to admit one applicant, before it is recorded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Admission {
    pub student: StudentId,
    pub aid: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(StudentId(12).to_string(), "S12");
        assert_eq!(UniversityId(3).to_string(), "U3");
    }
}
