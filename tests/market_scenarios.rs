//! End-to-end market scenarios.

use u_admissions::aid::{AidPolicy, MeritAugmentedAid, NeedCappedMeritAid};
use u_admissions::market::{
    ApplicationStrategy, CyclePolicy, Market, MarketConfig, OverbookPolicy, Student, StudentId,
    University, UniversityId,
};
use u_admissions::MarketError;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn students(scores: &[f64]) -> Vec<Student> {
    scores
        .iter()
        .enumerate()
        .map(|(i, &score)| Student::new(StudentId(i), score, 20.0, 0.5, 0.1).unwrap())
        .collect()
}

#[test]
fn no_overbooking_needed() {
    init_tracing();
    let students = students(&[1000.0, 1100.0, 1200.0, 1300.0, 1400.0]);
    let universities = vec![University::new(UniversityId(0), 0.8, 40.0, 10).unwrap()];
    let config = MarketConfig::default()
        .with_applications(ApplicationStrategy::All)
        .with_seed(1);

    let mut market = Market::new(students, universities, config).unwrap();
    let summary = market.run_cycle();

    assert_eq!(summary.applications, 5);
    assert_eq!(summary.offers, 5);
    assert_eq!(summary.enrolled, 5);
    assert_eq!(market.universities()[0].enrolled_count(), 5);
    assert!(market.students().iter().all(|s| s.offers().len() == 1));
    assert!(market.students().iter().all(|s| s.enrolled_rank() == Some(0)));
}

#[test]
fn hard_capacity_cutoff() {
    init_tracing();
    let students = students(&[900.0, 850.0, 800.0, 750.0, 700.0]);
    let universities = vec![University::new(UniversityId(0), 0.8, 40.0, 2).unwrap()];
    let config = MarketConfig::default()
        .with_applications(ApplicationStrategy::All)
        .with_overbook(OverbookPolicy::Fixed(1.0))
        .with_seed(1);

    let mut market = Market::new(students, universities, config).unwrap();
    market.run_cycle();

    let offered: Vec<usize> = market
        .students()
        .iter()
        .filter(|s| !s.offers().is_empty())
        .map(|s| s.id().0)
        .collect();
    assert_eq!(offered, vec![0, 1]);
    assert_eq!(
        market.universities()[0].enrolled_students(),
        &[StudentId(0), StudentId(1)]
    );
    assert_eq!(market.unmatched_count(), 3);
    for s in &market.students()[2..] {
        assert!(s.enrolled_at().is_none());
    }
}

#[test]
fn aid_clamping() {
    let student = Student::new(StudentId(0), 1600.0, 100.0, 0.5, 0.0).unwrap();
    for &prestige in &[0.0, 0.3, 0.7, 1.0] {
        let university = University::new(UniversityId(0), prestige, 50.0, 10).unwrap();
        for slack in [0.0, 0.25, 1.0, 10.0] {
            let policy = MeritAugmentedAid::new(slack).unwrap();
            let aid = policy.aid(&student, &university);
            let cap = policy.max_aid(&student, &university);
            assert!(aid >= 0.0);
            assert!(aid <= cap + 1e-12, "aid {aid} above cap {cap}");
            assert!(cap <= 50.0 + 1e-12);
        }
    }
}

#[test]
fn overbooking_with_competition_keeps_capacity() {
    init_tracing();
    let students: Vec<Student> = (0..200)
        .map(|i| {
            let score = 650.0 + (i * 53 % 950) as f64;
            let efc = (i * 7 % 100) as f64;
            let w = (i * 3 % 10) as f64 / 9.0;
            Student::new(StudentId(i), score, efc, w, 0.05 + (i % 3) as f64 * 0.05).unwrap()
        })
        .collect();
    let universities: Vec<University> = (0..9)
        .map(|i| {
            let prestige = 0.5 + 0.0625 * i as f64;
            let cost = 10.0 + 8.75 * i as f64;
            University::new(UniversityId(i), prestige, cost, 10 + 3 * i).unwrap()
        })
        .collect();
    let config = MarketConfig::competitive().with_seed(2024);

    let mut market = Market::new(students, universities, config).unwrap();
    market.run_cycle();
    let report = market.report();

    for u in &report.universities {
        assert!(u.enrolled <= u.capacity);
        assert!(u.offers_made >= u.enrolled);
    }
    assert_eq!(report.enrolled + report.unmatched, 200);
    assert!(report.enrolled > 0);
    assert!(report.enrolled <= report.total_capacity);
    assert_eq!(report.rank_histogram.iter().sum::<usize>(), report.enrolled);
}

#[test]
fn swapping_aid_policy_changes_offers_only() {
    let build = || {
        let students: Vec<Student> = (0..30)
            .map(|i| Student::new(StudentId(i), 800.0 + 25.0 * i as f64, 5.0, 0.5, 0.1).unwrap())
            .collect();
        let universities = vec![
            University::new(UniversityId(0), 0.6, 50.0, 10).unwrap(),
            University::new(UniversityId(1), 0.9, 50.0, 10).unwrap(),
        ];
        (students, universities)
    };
    let config = MarketConfig::baseline().with_seed(3);

    let (s, u) = build();
    let mut generous = Market::new(s, u, config.clone()).unwrap();
    generous.run_cycle();

    let (s, u) = build();
    let mut capped = Market::new(s, u, config)
        .unwrap()
        .with_aid_policy(NeedCappedMeritAid::default());
    capped.run_cycle();

    // Same applicants get offers: admission does not depend on aid.
    for (a, b) in generous.students().iter().zip(capped.students()) {
        let ua: Vec<_> = a.offers().iter().map(|o| o.university).collect();
        let ub: Vec<_> = b.offers().iter().map(|o| o.university).collect();
        assert_eq!(ua, ub);
        for (oa, ob) in a.offers().iter().zip(b.offers()) {
            assert!(oa.aid + 1e-12 >= ob.aid);
        }
    }
}

#[test]
fn cumulative_rounds_never_reassign() {
    let students: Vec<Student> = (0..60)
        .map(|i| Student::new(StudentId(i), 700.0 + 15.0 * i as f64, 30.0, 0.7, 0.1).unwrap())
        .collect();
    let universities = vec![
        University::new(UniversityId(0), 0.9, 40.0, 10).unwrap(),
        University::new(UniversityId(1), 0.7, 30.0, 10).unwrap(),
        University::new(UniversityId(2), 0.5, 20.0, 10).unwrap(),
    ];
    let config = MarketConfig::default()
        .with_applications(ApplicationStrategy::TopRanked(1))
        .with_overbook(OverbookPolicy::Fixed(1.0))
        .with_cycle_policy(CyclePolicy::Cumulative)
        .with_seed(17);
    let mut market = Market::new(students, universities, config).unwrap();

    let mut previous: Vec<Option<UniversityId>> = vec![None; 60];
    for _ in 0..4 {
        market.run_cycle();
        for (s, prev) in market.students().iter().zip(previous.iter_mut()) {
            if prev.is_some() {
                assert_eq!(s.enrolled_at(), *prev);
            }
            *prev = s.enrolled_at();
        }
        for u in market.universities() {
            assert!(u.enrolled_count() <= u.capacity());
        }
    }
    let total: usize = market.universities().iter().map(|u| u.enrolled_count()).sum();
    assert_eq!(total, 60 - market.unmatched_count());
}

#[test]
fn invalid_entities_fail_fast() {
    assert!(matches!(
        University::new(UniversityId(0), 0.5, 10.0, 0),
        Err(MarketError::InvalidConfiguration { field: "capacity", .. })
    ));
    assert!(matches!(
        University::new(UniversityId(0), 0.5, -10.0, 3),
        Err(MarketError::InvalidConfiguration { field: "cost", .. })
    ));
    assert!(matches!(
        University::new(UniversityId(0), 1.5, 10.0, 3),
        Err(MarketError::InvalidConfiguration { field: "prestige", .. })
    ));
    assert!(matches!(
        Student::new(StudentId(0), 1000.0, 10.0, 2.0, 0.1),
        Err(MarketError::InvalidConfiguration {
            field: "preference_weight",
            ..
        })
    ));
}
