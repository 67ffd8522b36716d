//! The embedded question pool.

use crate::model::{Question, QuestionError};

/// `(image, correct label, candidates)` for every built-in question.
const BUILTIN: [(&str, &str, [&str; 4]); 6] = [
    ("images/luxon.png", "Chode", ["Chode", "Burger", "Sorted", "Pizza"]),
    ("images/seymour.png", "Chode", ["Sandwich", "Hot Dog", "School Lunch", "Chode"]),
    ("images/willis.png", "Chode", ["Budget", "Chode", "TV Show", "Movie"]),
    ("images/vanVelden.png", "Chode", ["Chode", "Workplace", "Tree", "Time"]),
    ("images/collins.png", "Chode", ["Crusher", "Chode", "Whack", "20 bucks"]),
    ("images/jones.png", "Chode", ["Coal", "Train", "Chode", "NZ"]),
];

/// A fixed, ordered pool of questions to draw rounds from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    questions: Vec<Question>,
}

impl Catalog {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// The pool shipped with the game. Ids start at 1 in declaration order.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if an embedded entry fails validation.
    pub fn builtin() -> Result<Self, QuestionError> {
        let questions = (1_u64..)
            .zip(BUILTIN.iter())
            .map(|(id, (image, correct, candidates))| {
                Question::from_parts(id, image, correct, candidates)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(questions))
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
