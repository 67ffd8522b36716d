use std::fmt;
use std::path::{Path, PathBuf};

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::model::ids::QuestionId;

/// Number of candidate labels offered for every question.
pub const CHOICE_COUNT: usize = 4;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("image reference cannot be empty")]
    EmptyImageRef,

    #[error("label cannot be empty")]
    EmptyLabel,

    #[error("expected 4 candidate labels, got {got}")]
    WrongCandidateCount { got: usize },

    #[error("correct label {label:?} is not among the candidates")]
    CorrectLabelMissing { label: String },
}

//
// ─── LABEL ─────────────────────────────────────────────────────────────────────
//

/// Validated answer label (trimmed, non-empty).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Label(String);

impl Label {
    /// Create a validated label.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyLabel` if the label is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, QuestionError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(QuestionError::EmptyLabel);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Label {
    type Error = QuestionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        label.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//
// ─── IMAGE REFERENCE ───────────────────────────────────────────────────────────
//

/// Where the picture for a question lives: a relative file or a web URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    FilePath(PathBuf),
    Url(Url),
}

impl ImageRef {
    /// Parse an image reference. Absolute `http`/`https` URLs become `Url`,
    /// anything else is treated as a file path.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyImageRef` for blank input.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, QuestionError> {
        let s = raw.as_ref().trim();
        if s.is_empty() {
            return Err(QuestionError::EmptyImageRef);
        }
        match Url::parse(s) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(ImageRef::Url(url)),
            _ => Ok(ImageRef::FilePath(PathBuf::from(s))),
        }
    }

    #[must_use]
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            ImageRef::FilePath(p) => Some(p.as_path()),
            ImageRef::Url(_) => None,
        }
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageRef::FilePath(p) => write!(f, "{}", p.display()),
            ImageRef::Url(u) => write!(f, "{u}"),
        }
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A picture to guess plus its multiple-choice labels.
///
/// Candidate labels always contain the correct label. Duplicate candidates are
/// accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    image: ImageRef,
    correct: Label,
    candidates: [Label; CHOICE_COUNT],
}

impl Question {
    /// Build a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::WrongCandidateCount` unless exactly four candidates
    /// are given, and `QuestionError::CorrectLabelMissing` if `correct` is not one
    /// of them.
    pub fn new(
        id: QuestionId,
        image: ImageRef,
        correct: Label,
        candidates: Vec<Label>,
    ) -> Result<Self, QuestionError> {
        let got = candidates.len();
        let candidates: [Label; CHOICE_COUNT] = candidates
            .try_into()
            .map_err(|_| QuestionError::WrongCandidateCount { got })?;

        if !candidates.contains(&correct) {
            return Err(QuestionError::CorrectLabelMissing {
                label: correct.as_str().to_string(),
            });
        }

        Ok(Self {
            id,
            image,
            correct,
            candidates,
        })
    }

    /// Convenience constructor from raw strings, used for embedded catalogs.
    ///
    /// # Errors
    ///
    /// Returns any `QuestionError` raised while validating the parts.
    pub fn from_parts(
        id: u64,
        image: &str,
        correct: &str,
        candidates: &[&str],
    ) -> Result<Self, QuestionError> {
        let candidates = candidates
            .iter()
            .map(|c| Label::new(*c))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(
            QuestionId::new(id),
            ImageRef::parse(image)?,
            Label::new(correct)?,
            candidates,
        )
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn image(&self) -> &ImageRef {
        &self.image
    }

    #[must_use]
    pub fn correct(&self) -> &Label {
        &self.correct
    }

    #[must_use]
    pub fn candidates(&self) -> &[Label; CHOICE_COUNT] {
        &self.candidates
    }

    #[must_use]
    pub fn is_correct(&self, label: &Label) -> bool {
        &self.correct == label
    }

    /// Permute the candidate order in place.
    pub fn shuffle_candidates<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.candidates.shuffle(rng);
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
