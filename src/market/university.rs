//! The university side of the market.

use super::config::OverbookPolicy;
use super::student::Student;
use super::types::{Admission, StudentId, UniversityId};
use crate::aid::AidPolicy;
use crate::error::{ensure_in_range, ensure_non_negative, MarketError, Result};
use crate::ranking::{Ranker, RankingRule};
use crate::utility::UtilityModel;

/// A university with a fixed number of seats.
///
/// The applicant pool and the applicant/offer counters belong to the
/// current round. The enrolled students accumulate during a cycle and are
/// never more than `capacity`.
#[derive(Debug, Clone)]
pub struct University {
    id: UniversityId,
    prestige: f64,
    cost: f64,
    capacity: usize,

    applicant_pool: Vec<StudentId>,
    num_applicants: usize,
    offers_made: usize,
    enrolled_students: Vec<StudentId>,
}

impl University {
    /// Creates a university.
    ///
    /// Fails when prestige is outside `[0, 1]`, cost is negative or not
    /// finite, or capacity is zero.
    pub fn new(id: UniversityId, prestige: f64, cost: f64, capacity: usize) -> Result<Self> {
        ensure_in_range("prestige", prestige, 0.0, 1.0)?;
        ensure_non_negative("cost", cost)?;
        if capacity == 0 {
            return Err(MarketError::invalid("capacity", "must be positive, got 0"));
        }
        Ok(Self {
            id,
            prestige,
            cost,
            capacity,
            applicant_pool: Vec::new(),
            num_applicants: 0,
            offers_made: 0,
            enrolled_students: Vec::new(),
        })
    }

    pub fn id(&self) -> UniversityId {
        self.id
    }

    pub fn prestige(&self) -> f64 {
        self.prestige
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Applications not yet decided this round.
    pub fn applicant_pool(&self) -> &[StudentId] {
        &self.applicant_pool
    }

    /// Applications received since the last reset.
    pub fn num_applicants(&self) -> usize {
        self.num_applicants
    }

    /// Offers extended since the last reset.
    pub fn offers_made(&self) -> usize {
        self.offers_made
    }

    pub fn enrolled_students(&self) -> &[StudentId] {
        &self.enrolled_students
    }

    pub fn enrolled_count(&self) -> usize {
        self.enrolled_students.len()
    }

    pub fn remaining_seats(&self) -> usize {
        self.capacity - self.enrolled_students.len()
    }

    pub fn is_full(&self) -> bool {
        self.remaining_seats() == 0
    }

    /// Adds `student` to the pool. No capacity check.
    pub fn receive_application(&mut self, student: StudentId) {
        self.applicant_pool.push(student);
        self.num_applicants += 1;
    }

    /// Decides who in the current pool gets an offer, and with what aid.
    ///
    /// Ranks the pool by admission priority (score, ties in application
    /// order) and keeps the top `floor(remaining_seats · overbook_factor)`.
    /// Aid is clamped to `[0, cost]` whatever the policy returns.
    /// Pure: nothing is recorded until [`commit_admissions`](Self::commit_admissions).
    pub fn admission_decisions(
        &self,
        students: &[Student],
        model: &UtilityModel,
        aid_policy: &dyn AidPolicy,
        overbook: &OverbookPolicy,
    ) -> Vec<Admission> {
        if self.applicant_pool.is_empty() {
            return Vec::new();
        }
        let limit = overbook.admits(self.remaining_seats(), self.prestige);
        let context = PoolContext { students, model };
        Ranker::new()
            .with_rule(ByAdmissionPriority)
            .rank(&self.applicant_pool, &context)
            .into_iter()
            .take(limit)
            .map(|i| {
                let student = &students[self.applicant_pool[i].0];
                Admission {
                    student: student.id(),
                    aid: self.bounded_aid(aid_policy.aid(student, self)),
                }
            })
            .collect()
    }

    /// Records `admissions` as offers on the students and empties the pool.
    ///
    /// Returns the number of offers recorded.
    pub fn commit_admissions(&mut self, admissions: Vec<Admission>, students: &mut [Student]) -> usize {
        let count = admissions.len();
        for admission in admissions {
            students[admission.student.0].receive_offer(self.id, admission.aid);
        }
        self.offers_made += count;
        self.applicant_pool.clear();
        count
    }

    /// Admits from the current pool: decides, records offers, clears the pool.
    ///
    /// A second call with an empty pool does nothing.
    pub fn admit(
        &mut self,
        students: &mut [Student],
        model: &UtilityModel,
        aid_policy: &dyn AidPolicy,
        overbook: &OverbookPolicy,
    ) -> usize {
        let admissions = self.admission_decisions(students, model, aid_policy, overbook);
        self.commit_admissions(admissions, students)
    }

    fn bounded_aid(&self, aid: f64) -> f64 {
        if aid.is_nan() {
            0.0
        } else {
            aid.clamp(0.0, self.cost)
        }
    }

    /// Takes a seat for `student` if one is free.
    ///
    /// Returns `false` with no side effects when full. This is the only
    /// place a seat is ever taken.
    pub fn enroll(&mut self, student: StudentId) -> bool {
        if self.enrolled_students.len() < self.capacity {
            self.enrolled_students.push(student);
            true
        } else {
            false
        }
    }

    /// Clears the pool and the round counters, and the enrolled students
    /// when `clear_enrolled` is set. Idempotent.
    pub fn reset_for_cycle(&mut self, clear_enrolled: bool) {
        self.applicant_pool.clear();
        self.num_applicants = 0;
        self.offers_made = 0;
        if clear_enrolled {
            self.enrolled_students.clear();
        }
    }
}

struct PoolContext<'a> {
    students: &'a [Student],
    model: &'a UtilityModel,
}

struct ByAdmissionPriority;

impl<'a> RankingRule<StudentId, PoolContext<'a>> for ByAdmissionPriority {
    fn name(&self) -> &str {
        "AdmissionPriority"
    }

    fn value(&self, id: &StudentId, ctx: &PoolContext<'a>) -> f64 {
        ctx.model.admission_priority(&ctx.students[id.0])
    }
}
