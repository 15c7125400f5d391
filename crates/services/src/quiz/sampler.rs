use rand::Rng;
use rand::seq::index;

use quiz_core::QuestionBank;
use quiz_core::model::QuestionRecord;

use crate::error::SampleError;

/// Draws a fixed-size, uniformly random sample of questions without replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionSampler {
    sample_size: usize,
}

impl QuestionSampler {
    /// # Errors
    ///
    /// Returns `SampleError::ZeroSize` for `0` and `SampleError::ExceedsBank` when the
    /// bank holds fewer questions than requested.
    pub fn new(sample_size: usize, bank: &QuestionBank) -> Result<Self, SampleError> {
        if sample_size == 0 {
            return Err(SampleError::ZeroSize);
        }
        if sample_size > bank.len() {
            return Err(SampleError::ExceedsBank {
                requested: sample_size,
                available: bank.len(),
            });
        }
        Ok(Self { sample_size })
    }

    /// Pick `sample_size` distinct questions in random order.
    ///
    /// # Errors
    ///
    /// Returns `SampleError::ExceedsBank` if `bank` is smaller than the one this
    /// sampler was validated against.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        bank: &QuestionBank,
        rng: &mut R,
    ) -> Result<Vec<QuestionRecord>, SampleError> {
        let all = bank.all_questions();
        if self.sample_size > all.len() {
            return Err(SampleError::ExceedsBank {
                requested: self.sample_size,
                available: all.len(),
            });
        }

        Ok(index::sample(rng, all.len(), self.sample_size)
            .into_iter()
            .map(|i| all[i].clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn bank(n: usize) -> QuestionBank {
        let questions = (0..n)
            .map(|i| {
                QuestionRecord::new(format!("Q{i}"), vec!["A".into(), "B".into()], "A").unwrap()
            })
            .collect();
        QuestionBank::new(questions).unwrap()
    }

    #[test]
    fn rejects_zero_and_oversized_samples() {
        let bank = bank(3);
        assert_eq!(QuestionSampler::new(0, &bank), Err(SampleError::ZeroSize));
        assert_eq!(
            QuestionSampler::new(4, &bank),
            Err(SampleError::ExceedsBank {
                requested: 4,
                available: 3
            })
        );
    }

    #[test]
    fn every_sample_size_yields_distinct_bank_members() {
        let bank = bank(10);
        let prompts: HashSet<_> = bank.all_questions().iter().map(QuestionRecord::prompt).collect();
        let mut rng = StdRng::seed_from_u64(7);

        for k in 1..=bank.len() {
            let sampler = QuestionSampler::new(k, &bank).unwrap();
            for _ in 0..20 {
                let picked = sampler.sample(&bank, &mut rng).unwrap();
                assert_eq!(picked.len(), k);
                let distinct: HashSet<_> = picked.iter().map(QuestionRecord::prompt).collect();
                assert_eq!(distinct.len(), k);
                assert!(distinct.is_subset(&prompts));
            }
        }
    }

    #[test]
    fn seeded_sampling_is_deterministic() {
        let bank = bank(10);
        let sampler = QuestionSampler::new(3, &bank).unwrap();
        let a = sampler.sample(&bank, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = sampler.sample(&bank, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn sampling_reaches_every_question() {
        let bank = bank(5);
        let sampler = QuestionSampler::new(1, &bank).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = HashSet::new();
        for _ in 0..500 {
            let picked = sampler.sample(&bank, &mut rng).unwrap();
            seen.insert(picked[0].prompt().to_owned());
        }
        assert_eq!(seen.len(), 5);
    }
}
