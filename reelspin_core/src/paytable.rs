use reelspin_shared::{Outcome, ReelError, ReelResult, ResultTier};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultEntry {
    pub tier: ResultTier,
    /// Spreads strictly below this land in `tier`; `None` catches the rest.
    pub below: Option<f64>,
    pub message: String,
}

/// Ordered spread thresholds. The first tier is reserved for a spread of exactly 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultTable(pub Vec<ResultEntry>);

impl ResultTable {
    pub fn simple_default() -> Self {
        Self(vec![
            ResultEntry {
                tier: ResultTier::Jackpot,
                below: None,
                message: "JACKPOT! Perfect line-up!".into(),
            },
            ResultEntry {
                tier: ResultTier::Close,
                below: Some(20.0),
                message: "So close! Almost a perfect line.".into(),
            },
            ResultEntry {
                tier: ResultTier::Near,
                below: Some(100.0),
                message: "Not bad. Keep your eye on the party popper.".into(),
            },
            ResultEntry {
                tier: ResultTier::Miss,
                below: None,
                message: "Way off. Try again!".into(),
            },
        ])
    }

    /// Exact-zero entry first, catch-all last, ascending thresholds between.
    pub fn validate(&self) -> ReelResult<()> {
        let invalid = |msg: String| Err(ReelError::InvalidResults(msg));
        let [first, middle @ .., last] = self.0.as_slice() else {
            return invalid(format!("need at least 2 entries, got {}", self.0.len()));
        };
        if let Some(limit) = first.below {
            return invalid(format!(
                "first entry only matches a spread of 0, drop its threshold {limit}"
            ));
        }
        if let Some(limit) = last.below {
            return invalid(format!("last entry must catch the rest, found threshold {limit}"));
        }
        let mut floor = 0.0;
        for (i, entry) in middle.iter().enumerate() {
            match entry.below {
                Some(limit) if limit.is_finite() && limit > floor => floor = limit,
                Some(limit) => {
                    return invalid(format!(
                        "entry {} threshold {limit} must be finite and above {floor}",
                        i + 1
                    ))
                }
                None => return invalid(format!("entry {} is missing a threshold", i + 1)),
            }
        }
        Ok(())
    }

    pub fn classify(&self, spread: f64) -> Outcome {
        let entry = if spread == 0.0 {
            self.0.first()
        } else {
            self.0
                .iter()
                .skip(1)
                .find(|e| e.below.map_or(true, |limit| spread < limit))
                .or_else(|| self.0.last())
        };
        match entry {
            Some(e) => Outcome {
                spread,
                tier: e.tier,
                message: e.message.clone(),
            },
            None => Outcome {
                spread,
                tier: ResultTier::Miss,
                message: String::new(),
            },
        }
    }
}

impl Default for ResultTable {
    fn default() -> Self {
        Self::simple_default()
    }
}

/// Publishes an outcome once per change, however often the scan reruns.
#[derive(Debug, Default, Clone)]
pub struct ResultReporter {
    published: Option<Outcome>,
}

impl ResultReporter {
    pub fn observe(&mut self, outcome: Option<&Outcome>) -> Option<&Outcome> {
        match outcome {
            Some(o) if self.published.as_ref() != Some(o) => {
                tracing::info!(spread = o.spread, tier = ?o.tier, "result");
                self.published = Some(o.clone());
                self.published.as_ref()
            }
            _ => None,
        }
    }

    pub fn published(&self) -> Option<&Outcome> {
        self.published.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds() {
        let t = ResultTable::simple_default();
        assert_eq!(t.classify(0.0).tier, ResultTier::Jackpot);
        assert_eq!(t.classify(0.5).tier, ResultTier::Close);
        assert_eq!(t.classify(19.9).tier, ResultTier::Close);
        assert_eq!(t.classify(20.0).tier, ResultTier::Near);
        assert_eq!(t.classify(99.0).tier, ResultTier::Near);
        assert_eq!(t.classify(100.0).tier, ResultTier::Miss);
        assert_eq!(t.classify(350.0).tier, ResultTier::Miss);
    }

    #[test]
    fn validate_rejects_bad_tables() {
        assert!(ResultTable::simple_default().validate().is_ok());
        assert!(matches!(
            ResultTable(Vec::new()).validate(),
            Err(ReelError::InvalidResults(_))
        ));

        let mut zero_threshold = ResultTable::simple_default();
        zero_threshold.0[0].below = Some(5.0);
        assert!(zero_threshold.validate().is_err());

        let mut descending = ResultTable::simple_default();
        descending.0[2].below = Some(10.0);
        assert!(descending.validate().is_err());

        let mut capped = ResultTable::simple_default();
        capped.0[3].below = Some(500.0);
        assert!(capped.validate().is_err());
    }

    #[test]
    fn reporter_publishes_once() {
        let t = ResultTable::simple_default();
        let o = t.classify(0.0);
        let mut r = ResultReporter::default();
        assert!(r.observe(None).is_none());
        assert!(r.observe(Some(&o)).is_some());
        assert!(r.observe(Some(&o)).is_none());
        assert_eq!(r.published(), Some(&o));
    }
}
