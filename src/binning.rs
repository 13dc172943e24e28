// 🗃️ Eligibility Binning - Three ordered report sections
//
// Bin 1: college not reserved, no Language coursework anywhere, domestic
// Bin 2: not bin 1, heavy transfer record
// Bin 3: everyone else
//
// Output is bin 1, then 2, then 3; input order is kept inside each bin.

use crate::config::ScreeningPolicy;
use crate::student::Student;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum EligibilityBin {
    /// Domestic student outside the reserved colleges with no Language courses
    DomesticNoLanguage,

    /// Transfer count at or above the threshold
    TransferHeavy,

    Remaining,
}

impl EligibilityBin {
    pub const ALL: [EligibilityBin; 3] = [
        EligibilityBin::DomesticNoLanguage,
        EligibilityBin::TransferHeavy,
        EligibilityBin::Remaining,
    ];

    /// 1, 2 or 3
    pub fn number(&self) -> u8 {
        match self {
            EligibilityBin::DomesticNoLanguage => 1,
            EligibilityBin::TransferHeavy => 2,
            EligibilityBin::Remaining => 3,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(EligibilityBin::DomesticNoLanguage),
            2 => Some(EligibilityBin::TransferHeavy),
            3 => Some(EligibilityBin::Remaining),
            _ => None,
        }
    }
}

impl From<EligibilityBin> for u8 {
    fn from(bin: EligibilityBin) -> u8 {
        bin.number()
    }
}

impl TryFrom<u8> for EligibilityBin {
    type Error = String;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        EligibilityBin::from_number(number).ok_or_else(|| format!("invalid bin number: {}", number))
    }
}

// ============================================================================
// BINNER
// ============================================================================

pub struct EligibilityBinner<'a> {
    policy: &'a ScreeningPolicy,
}

impl<'a> EligibilityBinner<'a> {
    pub fn new(policy: &'a ScreeningPolicy) -> Self {
        EligibilityBinner { policy }
    }

    /// Which bin a fully categorized student belongs in
    pub fn classify(&self, student: &Student) -> EligibilityBin {
        if !self.policy.is_reserved_college(&student.profile.college)
            && student.language_course_count() == 0
            && student.is_domestic(self.policy)
        {
            return EligibilityBin::DomesticNoLanguage;
        }

        if student.transfer_classes.len() >= self.policy.transfer_bin_threshold {
            return EligibilityBin::TransferHeavy;
        }

        EligibilityBin::Remaining
    }

    /// Assign every student a bin and return them in report order.
    ///
    /// Students that already carry a bin keep it.
    pub fn bin_students(&self, students: Vec<Student>) -> Vec<Student> {
        let mut sections: [Vec<Student>; 3] = Default::default();

        for mut student in students {
            let bin = match student.bin {
                Some(bin) => bin,
                None => {
                    let bin = self.classify(&student);
                    student.bin = Some(bin);
                    bin
                }
            };
            sections[(bin.number() - 1) as usize].push(student);
        }

        let [first, second, third] = sections;
        first.into_iter().chain(second).chain(third).collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
