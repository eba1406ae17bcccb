//! Cycle orchestration.
//!
//! [`Market`] owns both registries and runs Apply → Admit → Choose with a
//! barrier between phases. Each phase is split into a pure decision step,
//! which may fan out over rayon, and a commit step that applies every
//! mutation sequentially in id order.

use super::config::MarketConfig;
use super::report::CycleSummary;
use super::student::Student;
use super::types::{StudentId, UniversityId};
use super::university::University;
use crate::aid::{AidPolicy, MeritAugmentedAid};
use crate::error::{MarketError, Result};
use crate::parallel;
use crate::random::create_rng;
use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info};

/// A population of students and universities plus the rules they play by.
///
/// # Usage
///
/// ```
/// use u_admissions::market::{Market, MarketConfig, Student, StudentId, University, UniversityId};
///
/// let students = (0..20)
///     .map(|i| Student::new(StudentId(i), 900.0 + 20.0 * i as f64, 15.0, 0.5, 0.1))
///     .collect::<Result<Vec<_>, _>>()
///     .unwrap();
/// let universities = vec![
///     University::new(UniversityId(0), 0.9, 60.0, 5).unwrap(),
///     University::new(UniversityId(1), 0.6, 30.0, 10).unwrap(),
/// ];
///
/// let mut market = Market::new(students, universities, MarketConfig::default().with_seed(42)).unwrap();
/// let summary = market.run_cycle();
/// assert!(summary.enrolled <= 15);
/// ```
pub struct Market {
    students: Vec<Student>,
    universities: Vec<University>,
    config: MarketConfig,
    aid_policy: Box<dyn AidPolicy>,
    rng: StdRng,
    cycles_run: usize,
}

impl Market {
    /// Builds a market from fully-formed entities.
    ///
    /// Entity ids must equal their position in the given vectors. Fails on
    /// an invalid configuration or a misplaced entity. The aid policy
    /// defaults to [`MeritAugmentedAid`].
    pub fn new(
        students: Vec<Student>,
        universities: Vec<University>,
        config: MarketConfig,
    ) -> Result<Self> {
        config.validate()?;
        for (index, s) in students.iter().enumerate() {
            if s.id() != StudentId(index) {
                return Err(MarketError::RegistryMismatch {
                    entity: "student",
                    id: s.id().0,
                    index,
                });
            }
        }
        for (index, u) in universities.iter().enumerate() {
            if u.id() != UniversityId(index) {
                return Err(MarketError::RegistryMismatch {
                    entity: "university",
                    id: u.id().0,
                    index,
                });
            }
        }

        let rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };

        debug!(
            students = students.len(),
            universities = universities.len(),
            "market created"
        );

        Ok(Self {
            students,
            universities,
            config,
            aid_policy: Box::new(MeritAugmentedAid::default()),
            rng,
            cycles_run: 0,
        })
    }

    /// Replaces the aid policy.
    pub fn with_aid_policy<P: AidPolicy + 'static>(mut self, policy: P) -> Self {
        self.aid_policy = Box::new(policy);
        self
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    pub fn aid_policy(&self) -> &dyn AidPolicy {
        self.aid_policy.as_ref()
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn universities(&self) -> &[University] {
        &self.universities
    }

    pub fn student(&self, id: StudentId) -> Option<&Student> {
        self.students.get(id.0)
    }

    pub fn university(&self, id: UniversityId) -> Option<&University> {
        self.universities.get(id.0)
    }

    /// Number of completed cycles.
    pub fn cycles_run(&self) -> usize {
        self.cycles_run
    }

    /// Students without a seat.
    pub fn unmatched_count(&self) -> usize {
        self.students.iter().filter(|s| !s.is_enrolled()).count()
    }

    /// Runs one full Apply → Admit → Choose cycle.
    ///
    /// Resets round state first according to the [`CyclePolicy`](super::CyclePolicy).
    /// On return every student is enrolled at most once and no university
    /// exceeds its capacity.
    pub fn run_cycle(&mut self) -> CycleSummary {
        self.reset_for_cycle();

        let applications = self.apply_phase();
        let offers = self.admit_phase();
        let enrolled = self.choose_phase();

        let summary = CycleSummary {
            cycle: self.cycles_run,
            applications,
            offers,
            enrolled,
            unmatched: self.unmatched_count(),
        };
        self.cycles_run += 1;

        info!(
            cycle = summary.cycle,
            applications = summary.applications,
            offers = summary.offers,
            enrolled = summary.enrolled,
            unmatched = summary.unmatched,
            "cycle complete"
        );
        summary
    }

    /// Runs `cycles` consecutive cycles.
    pub fn run(&mut self, cycles: usize) -> Vec<CycleSummary> {
        (0..cycles).map(|_| self.run_cycle()).collect()
    }

    /// Clears per-round state on both sides.
    ///
    /// Universities always drop their pool and counters and students their
    /// applications and offers; whether enrollment survives depends on the
    /// cycle policy. Calling this twice is the same as calling it once.
    pub fn reset_for_cycle(&mut self) {
        let clear_enrolled = self.config.cycle_policy.clears_enrollment();
        for u in &mut self.universities {
            u.reset_for_cycle(clear_enrolled);
        }
        for s in &mut self.students {
            if clear_enrolled {
                s.reset();
            } else {
                s.clear_round();
            }
        }
    }

    fn sequential(&self) -> bool {
        !self.config.parallel
    }

    /// Every unenrolled student picks universities and applies.
    ///
    /// Each student gets its own RNG, seeded from the market RNG in student
    /// order, so plans do not depend on scheduling.
    fn apply_phase(&mut self) -> usize {
        let seeds: Vec<u64> = (0..self.students.len()).map(|_| self.rng.random()).collect();

        let universities = &self.universities;
        let config = &self.config;
        let plans = parallel::map_indexed(
            &self.students,
            |i, student| {
                if student.is_enrolled() {
                    return Vec::new();
                }
                let mut rng = create_rng(seeds[i]);
                student.plan_applications(universities, &config.utility, &config.applications, &mut rng)
            },
            self.sequential(),
        );

        let mut submitted = 0;
        for (student, plan) in self.students.iter_mut().zip(plans) {
            for uid in plan {
                if student.apply(&mut self.universities[uid.0]) {
                    submitted += 1;
                }
            }
        }
        debug!(applications = submitted, "apply phase complete");
        submitted
    }

    /// Every university admits from its pool.
    fn admit_phase(&mut self) -> usize {
        let students = &self.students;
        let config = &self.config;
        let aid_policy = self.aid_policy.as_ref();
        let decisions = parallel::map_slice(
            &self.universities,
            |u| u.admission_decisions(students, &config.utility, aid_policy, &config.overbook),
            self.sequential(),
        );

        let mut offers = 0;
        for (university, admissions) in self.universities.iter_mut().zip(decisions) {
            offers += university.commit_admissions(admissions, &mut self.students);
        }
        debug!(offers, "admit phase complete");
        offers
    }

    /// Every student with offers enrolls at its best available option.
    ///
    /// Rankings are computed up front; seats are then taken in student id
    /// order, which serializes all enrollments against each university.
    fn choose_phase(&mut self) -> usize {
        let universities = &self.universities;
        let model = &self.config.utility;
        let rankings = parallel::map_slice(
            &self.students,
            |s| {
                if s.is_enrolled() {
                    Vec::new()
                } else {
                    s.rank_offers(universities, model)
                }
            },
            self.sequential(),
        );

        let mut enrolled = 0;
        for (student, ranking) in self.students.iter_mut().zip(rankings) {
            if student
                .accept_first_available(&ranking, &mut self.universities)
                .is_some()
            {
                enrolled += 1;
            }
        }
        debug!(enrolled, "choose phase complete");
        enrolled
    }
}

impl std::fmt::Debug for Market {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Market")
            .field("students", &self.students.len())
            .field("universities", &self.universities.len())
            .field("aid_policy", &self.aid_policy.name())
            .field("cycles_run", &self.cycles_run)
            .finish()
    }
}
