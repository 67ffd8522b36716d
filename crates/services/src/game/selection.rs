use rand::Rng;
use rand::seq::SliceRandom;

use glimpse_core::model::Question;

use crate::error::GameError;

/// Draw `total_rounds` questions for a game.
///
/// The pool is shuffled uniformly and cut to length, then every drawn question
/// gets its own candidate order.
///
/// # Errors
///
/// Returns `GameError::PoolTooSmall` if the pool cannot fill every round.
pub fn select_questions<R: Rng + ?Sized>(
    pool: &[Question],
    total_rounds: u32,
    rng: &mut R,
) -> Result<Vec<Question>, GameError> {
    let wanted = usize::try_from(total_rounds).unwrap_or(usize::MAX);
    if pool.len() < wanted {
        return Err(GameError::PoolTooSmall {
            available: pool.len(),
            requested: total_rounds,
        });
    }

    let mut drawn = pool.to_vec();
    drawn.shuffle(rng);
    drawn.truncate(wanted);
    for question in &mut drawn {
        question.shuffle_candidates(rng);
    }
    Ok(drawn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glimpse_core::Catalog;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn draws_distinct_questions_with_all_candidates() {
        let catalog = Catalog::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let drawn = select_questions(catalog.questions(), 5, &mut rng).unwrap();
        assert_eq!(drawn.len(), 5);

        let ids: HashSet<_> = drawn.iter().map(Question::id).collect();
        assert_eq!(ids.len(), 5);

        for question in &drawn {
            let original = catalog
                .questions()
                .iter()
                .find(|q| q.id() == question.id())
                .unwrap();
            let mut a: Vec<_> = original.candidates().iter().map(|l| l.as_str()).collect();
            let mut b: Vec<_> = question.candidates().iter().map(|l| l.as_str()).collect();
            a.sort_unstable();
            b.sort_unstable();
            assert_eq!(a, b);
            assert_eq!(original.correct(), question.correct());
        }
    }

    #[test]
    fn same_seed_same_draw() {
        let catalog = Catalog::builtin().unwrap();
        let a = select_questions(catalog.questions(), 5, &mut StdRng::seed_from_u64(3)).unwrap();
        let b = select_questions(catalog.questions(), 5, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn small_pool_is_rejected() {
        let catalog = Catalog::builtin().unwrap();
        let err = select_questions(&catalog.questions()[..2], 5, &mut StdRng::seed_from_u64(1))
            .unwrap_err();
        assert!(matches!(
            err,
            GameError::PoolTooSmall {
                available: 2,
                requested: 5
            }
        ));
    }
}
