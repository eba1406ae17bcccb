//! Read-only snapshots of market state for downstream analysis.
//!
//! Nothing here mutates the market. Snapshots are plain data; with the
//! `serde` feature they serialize for whatever tabular or plotting layer
//! consumes them.

use super::engine::Market;
use super::types::{StudentId, UniversityId};
use crate::aid::need;

/// Counts from one [`Market::run_cycle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CycleSummary {
    /// 0-based cycle index.
    pub cycle: usize,
    /// Applications submitted.
    pub applications: usize,
    /// Offers extended.
    pub offers: usize,
    /// Students newly enrolled.
    pub enrolled: usize,
    /// Students without a seat after the cycle.
    pub unmatched: usize,
}

/// Per-university aggregates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UniversityReport {
    pub university: UniversityId,
    pub prestige: f64,
    pub cost: f64,
    pub capacity: usize,
    pub num_applicants: usize,
    /// Offers this university extended in the current round.
    pub offers_made: usize,
    pub enrolled: usize,
    /// Mean aid across offers made; 0 without offers.
    pub avg_aid_offered: f64,
    /// `100 · enrolled / offers_made`; 0 without offers.
    pub yield_rate: f64,
    /// Noise-free application utility averaged over every student.
    pub avg_app_utility: f64,
}

/// Aid received by an enrolled student against the need at that university.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AidNeedPoint {
    pub student: StudentId,
    pub university: UniversityId,
    pub need: f64,
    pub aid: f64,
}

/// Market-wide snapshot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketReport {
    pub universities: Vec<UniversityReport>,
    pub total_capacity: usize,
    pub enrolled: usize,
    pub unmatched: usize,
    /// `rank_histogram[k]` = students who enrolled at their k-th ranked offer.
    pub rank_histogram: Vec<usize>,
    pub aid_vs_need: Vec<AidNeedPoint>,
}

impl Market {
    /// Aggregates for one university, or `None` for an unknown id.
    pub fn university_report(&self, id: UniversityId) -> Option<UniversityReport> {
        let university = self.university(id)?;
        let model = &self.config().utility;

        let aids: Vec<f64> = self
            .students()
            .iter()
            .filter_map(|s| s.aid_offer(id))
            .collect();
        let offers_made = aids.len();
        let avg_aid_offered = if offers_made > 0 {
            aids.iter().sum::<f64>() / offers_made as f64
        } else {
            0.0
        };

        let enrolled = university.enrolled_count();
        let yield_rate = if offers_made > 0 {
            100.0 * enrolled as f64 / offers_made as f64
        } else {
            0.0
        };

        let n_students = self.students().len();
        let avg_app_utility = if n_students > 0 {
            self.students()
                .iter()
                .map(|s| model.expected_application_utility(s, university))
                .sum::<f64>()
                / n_students as f64
        } else {
            0.0
        };

        Some(UniversityReport {
            university: id,
            prestige: university.prestige(),
            cost: university.cost(),
            capacity: university.capacity(),
            num_applicants: university.num_applicants(),
            offers_made,
            enrolled,
            avg_aid_offered,
            yield_rate,
            avg_app_utility,
        })
    }

    /// Snapshot of the whole market.
    pub fn report(&self) -> MarketReport {
        let universities: Vec<UniversityReport> = self
            .universities()
            .iter()
            .filter_map(|u| self.university_report(u.id()))
            .collect();

        let mut rank_histogram = Vec::new();
        let mut aid_vs_need = Vec::new();
        for s in self.students() {
            let (Some(uid), Some(rank)) = (s.enrolled_at(), s.enrolled_rank()) else {
                continue;
            };
            if rank_histogram.len() <= rank {
                rank_histogram.resize(rank + 1, 0);
            }
            rank_histogram[rank] += 1;

            let university = &self.universities()[uid.0];
            aid_vs_need.push(AidNeedPoint {
                student: s.id(),
                university: uid,
                need: need(s, university),
                aid: s.enrolled_aid().unwrap_or(0.0),
            });
        }

        let enrolled = aid_vs_need.len();
        MarketReport {
            total_capacity: universities.iter().map(|u| u.capacity).sum(),
            enrolled,
            unmatched: self.students().len() - enrolled,
            universities,
            rank_histogram,
            aid_vs_need,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::aid::NeedOnlyAid;
    use crate::market::{
        ApplicationStrategy, CyclePolicy, Market, MarketConfig, OverbookPolicy, Student, StudentId,
        University, UniversityId,
    };

    fn market() -> Market {
        let students = [1200.0, 1100.0, 1000.0, 900.0]
            .iter()
            .enumerate()
            .map(|(i, &score)| Student::new(StudentId(i), score, 10.0, 0.5, 0.0).unwrap())
            .collect();
        let universities = vec![
            University::new(UniversityId(0), 0.9, 40.0, 2).unwrap(),
            University::new(UniversityId(1), 0.5, 20.0, 5).unwrap(),
        ];
        Market::new(students, universities, MarketConfig::baseline().with_seed(1))
            .unwrap()
            .with_aid_policy(NeedOnlyAid)
    }

    #[test]
    fn test_report_before_any_cycle() {
        let report = market().report();
        assert_eq!(report.enrolled, 0);
        assert_eq!(report.unmatched, 4);
        assert_eq!(report.total_capacity, 7);
        assert!(report.rank_histogram.is_empty());
        for u in &report.universities {
            assert_eq!(u.offers_made, 0);
            assert_eq!(u.yield_rate, 0.0);
            assert_eq!(u.avg_aid_offered, 0.0);
        }
    }

    #[test]
    fn test_report_after_cycle() {
        let mut market = market();
        market.run_cycle();
        let report = market.report();

        let u0 = &report.universities[0];
        assert_eq!(u0.num_applicants, 4);
        assert_eq!(u0.offers_made, 2);
        assert!((u0.avg_aid_offered - 30.0).abs() < 1e-12);
        assert!(u0.yield_rate <= 100.0);

        assert_eq!(report.enrolled + report.unmatched, 4);
        assert_eq!(report.rank_histogram.iter().sum::<usize>(), report.enrolled);
        for point in &report.aid_vs_need {
            assert!((point.aid - point.need).abs() < 1e-12);
        }
    }

    #[test]
    fn test_cumulative_report_counts_current_round() {
        let students = (0..30)
            .map(|i| Student::new(StudentId(i), 700.0 + 25.0 * i as f64, 15.0, 0.5, 0.0).unwrap())
            .collect();
        let universities = vec![
            University::new(UniversityId(0), 0.9, 40.0, 5).unwrap(),
            University::new(UniversityId(1), 0.6, 20.0, 5).unwrap(),
        ];
        let config = MarketConfig::default()
            .with_applications(ApplicationStrategy::All)
            .with_overbook(OverbookPolicy::Fixed(2.0))
            .with_cycle_policy(CyclePolicy::Cumulative)
            .with_seed(11);
        let mut market = Market::new(students, universities, config)
            .unwrap()
            .with_aid_policy(NeedOnlyAid);

        let first = market.run_cycle();
        assert_eq!(first.enrolled, 10);
        let second = market.run_cycle();
        assert_eq!(second.offers, 0);
        assert_eq!(second.enrolled, 0);

        let report = market.report();
        for (u, r) in market.universities().iter().zip(&report.universities) {
            assert_eq!(r.offers_made, u.offers_made());
            assert_eq!(r.offers_made, 0);
            assert_eq!(r.yield_rate, 0.0);
            assert_eq!(r.enrolled, 5);
        }
        assert_eq!(report.enrolled, 10);
        assert_eq!(report.aid_vs_need.len(), 10);
        for point in &report.aid_vs_need {
            assert!((point.aid - point.need).abs() < 1e-12);
        }
    }

    #[test]
    fn test_unknown_university() {
        assert!(market().university_report(UniversityId(7)).is_none());
    }
}
