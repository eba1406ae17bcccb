//! The student side of the market.

use super::config::ApplicationStrategy;
use super::types::{Offer, StudentId, UniversityId};
use super::university::University;
use crate::error::{ensure_in_range, ensure_non_negative, Result};
use crate::ranking::{rank_values, Ranker, RankingRule};
use crate::utility::UtilityModel;
use rand::seq::index;
use rand::Rng;
use tracing::trace;

/// A prospective student.
///
/// Static attributes are validated at construction and never change. The
/// per-round state (applications and offers) is mutated by the market
/// during a cycle and cleared between cycles. The accepted offer is kept
/// apart from the round buffers so it can outlive them.
#[derive(Debug, Clone)]
pub struct Student {
    id: StudentId,
    score: f64,
    efc: f64,
    preference_weight: f64,
    noise: f64,

    applications: Vec<UniversityId>,
    offers: Vec<Offer>,
    enrolled_offer: Option<Offer>,
    enrolled_rank: Option<usize>,
}

impl Student {
    /// Creates a student.
    ///
    /// # Arguments
    /// * `score` - Academic strength, finite and non-negative (typically 600–1600)
    /// * `efc` - Expected family contribution, finite and non-negative
    /// * `preference_weight` - 0 = purely cost-driven, 1 = purely prestige-driven
    /// * `noise` - Standard deviation of the application-time utility jitter
    pub fn new(
        id: StudentId,
        score: f64,
        efc: f64,
        preference_weight: f64,
        noise: f64,
    ) -> Result<Self> {
        ensure_non_negative("score", score)?;
        ensure_non_negative("efc", efc)?;
        ensure_in_range("preference_weight", preference_weight, 0.0, 1.0)?;
        ensure_non_negative("noise", noise)?;
        Ok(Self {
            id,
            score,
            efc,
            preference_weight,
            noise,
            applications: Vec::new(),
            offers: Vec::new(),
            enrolled_offer: None,
            enrolled_rank: None,
        })
    }

    pub fn id(&self) -> StudentId {
        self.id
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn efc(&self) -> f64 {
        self.efc
    }

    pub fn preference_weight(&self) -> f64 {
        self.preference_weight
    }

    pub fn noise(&self) -> f64 {
        self.noise
    }

    /// Universities applied to this round, in submission order.
    pub fn applications(&self) -> &[UniversityId] {
        &self.applications
    }

    /// Offers received this round, in the order they arrived.
    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    /// Aid offered by `university`, if it made an offer.
    pub fn aid_offer(&self, university: UniversityId) -> Option<f64> {
        self.offers
            .iter()
            .find(|o| o.university == university)
            .map(|o| o.aid)
    }

    pub fn has_offer_from(&self, university: UniversityId) -> bool {
        self.aid_offer(university).is_some()
    }

    pub fn enrolled_at(&self) -> Option<UniversityId> {
        self.enrolled_offer.map(|o| o.university)
    }

    /// Aid attached to the accepted offer.
    pub fn enrolled_aid(&self) -> Option<f64> {
        self.enrolled_offer.map(|o| o.aid)
    }

    pub fn is_enrolled(&self) -> bool {
        self.enrolled_offer.is_some()
    }

    /// 0-based position of the accepted offer in this student's ranking.
    pub fn enrolled_rank(&self) -> Option<usize> {
        self.enrolled_rank
    }

    /// Applies to `university`.
    ///
    /// Returns `false` without side effects when already applied this
    /// round; otherwise records the application on both sides.
    pub fn apply(&mut self, university: &mut University) -> bool {
        let uid = university.id();
        if self.applications.contains(&uid) {
            return false;
        }
        self.applications.push(uid);
        university.receive_application(self.id);
        true
    }

    /// Picks the universities to apply to this round.
    ///
    /// Draws a fresh noisy application utility for every university, ranks
    /// them best first, and keeps as many as `strategy` allows. A
    /// utility-blind strategy samples uniformly instead.
    pub fn plan_applications<R: Rng + ?Sized>(
        &self,
        universities: &[University],
        model: &UtilityModel,
        strategy: &ApplicationStrategy,
        rng: &mut R,
    ) -> Vec<UniversityId> {
        let budget = strategy.budget(self, universities.len(), rng);
        if budget == 0 {
            return Vec::new();
        }

        if strategy.ignores_utility() {
            return index::sample(rng, universities.len(), budget)
                .into_vec()
                .into_iter()
                .map(|i| universities[i].id())
                .collect();
        }

        let utilities: Vec<f64> = universities
            .iter()
            .map(|u| model.application_utility(self, u, rng))
            .collect();
        rank_values(&utilities)
            .into_iter()
            .take(budget)
            .map(|i| universities[i].id())
            .collect()
    }

    /// Records an admission offer. A second offer from the same university
    /// in the same round is ignored.
    pub(crate) fn receive_offer(&mut self, university: UniversityId, aid: f64) {
        if self.has_offer_from(university) {
            return;
        }
        self.offers.push(Offer { university, aid });
    }

    /// Ranks this round's offers by descending choice utility.
    ///
    /// Returns indices into [`offers`](Self::offers); equal utilities keep
    /// arrival order.
    pub fn rank_offers(&self, universities: &[University], model: &UtilityModel) -> Vec<usize> {
        let context = OfferContext {
            student: self,
            universities,
            model,
        };
        Ranker::new()
            .with_rule(ByChoiceUtility)
            .rank(&self.offers, &context)
    }

    /// Enrolls at the best offer that still has a seat.
    ///
    /// No-op without offers or when already enrolled. Returns the
    /// university enrolled at, or `None` when every offered university was
    /// full.
    pub fn choose(
        &mut self,
        universities: &mut [University],
        model: &UtilityModel,
    ) -> Option<UniversityId> {
        let ranking = self.rank_offers(universities, model);
        self.accept_first_available(&ranking, universities)
    }

    /// Walks `ranking` (indices into offers) and enrolls at the first
    /// university that accepts.
    pub(crate) fn accept_first_available(
        &mut self,
        ranking: &[usize],
        universities: &mut [University],
    ) -> Option<UniversityId> {
        if self.enrolled_offer.is_some() {
            return None;
        }
        for (rank, &offer_idx) in ranking.iter().enumerate() {
            let offer = self.offers[offer_idx];
            let uid = offer.university;
            if universities[uid.0].enroll(self.id) {
                self.enrolled_offer = Some(offer);
                self.enrolled_rank = Some(rank);
                return Some(uid);
            }
            trace!(student = %self.id, university = %uid, rank, "enrollment rejected, university full");
        }
        None
    }

    /// Clears applications and offers, keeping enrollment.
    pub(crate) fn clear_round(&mut self) {
        self.applications.clear();
        self.offers.clear();
    }

    /// Clears all per-round state including enrollment.
    pub(crate) fn reset(&mut self) {
        self.clear_round();
        self.enrolled_offer = None;
        self.enrolled_rank = None;
    }
}

struct OfferContext<'a> {
    student: &'a Student,
    universities: &'a [University],
    model: &'a UtilityModel,
}

struct ByChoiceUtility;

impl<'a> RankingRule<Offer, OfferContext<'a>> for ByChoiceUtility {
    fn name(&self) -> &str {
        "ChoiceUtility"
    }

    fn value(&self, offer: &Offer, ctx: &OfferContext<'a>) -> f64 {
        let university = &ctx.universities[offer.university.0];
        ctx.model.choice_utility(ctx.student, university, offer.aid)
    }
}
