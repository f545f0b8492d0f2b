//! Randomized question/answer fixture generation.
//!
//! Every generated string leads with a fresh UUID, so scenarios can create a
//! question and later find exactly that text on the page without colliding
//! with leftovers from other runs. A seeded generator replays the same
//! sequence, which keeps failure reproduction deterministic.

use crate::error::{Result, UatError};
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use uuid::Uuid;

/// Punctuation alphabet every input field must accept verbatim.
///
/// Boundary strings lead with this alphabet so a field that mangles or
/// truncates the interesting characters fails loudly instead of losing a
/// few random filler letters at the end.
pub const SPECIAL_CHARS: &str = "\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Batch size used when a scenario just needs "a few" questions.
pub const DEFAULT_PAIR_COUNT: usize = 2;

const CATCH_ADJECTIVES: &[&str] = &[
    "Adaptive",
    "Balanced",
    "Ergonomic",
    "Modular",
    "Robust",
    "Seamless",
    "Streamlined",
    "Versatile",
];

const CATCH_DESCRIPTORS: &[&str] = &[
    "context-sensitive",
    "fault-tolerant",
    "high-level",
    "multi-tasking",
    "scalable",
    "uniform",
    "well-modulated",
    "zero-defect",
];

const CATCH_NOUNS: &[&str] = &[
    "architecture",
    "framework",
    "hierarchy",
    "interface",
    "knowledge base",
    "paradigm",
    "toolset",
    "workflow",
];

const BUZZ_VERBS: &[&str] = &[
    "automate",
    "deploy",
    "harness",
    "integrate",
    "leverage",
    "orchestrate",
    "repurpose",
    "streamline",
];

const BUZZ_ADJECTIVES: &[&str] = &[
    "cross-platform",
    "distributed",
    "dynamic",
    "end-to-end",
    "frictionless",
    "granular",
    "turn-key",
    "virtual",
];

const BUZZ_NOUNS: &[&str] = &[
    "channels",
    "deliverables",
    "experiences",
    "interfaces",
    "metrics",
    "pipelines",
    "platforms",
    "workflows",
];

const HACKER_VERBS: &[&str] = &[
    "bypass",
    "compress",
    "index",
    "override",
    "parse",
    "quantify",
    "reboot",
    "synthesize",
];

const HACKER_ADJECTIVES: &[&str] = &[
    "auxiliary",
    "digital",
    "haptic",
    "neural",
    "optical",
    "primary",
    "virtual",
    "wireless",
];

const HACKER_NOUNS: &[&str] = &[
    "array",
    "bandwidth",
    "bus",
    "card",
    "firewall",
    "interface",
    "panel",
    "protocol",
];

/// One question with its answer, ready to be typed into the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionAnswerPair {
    /// Question text, ending in a question mark.
    pub question: String,
    /// Answer text, starting with an affirmation.
    pub answer: String,
}

/// Produces unique question/answer pairs and boundary-length strings.
#[derive(Debug)]
pub struct PairGenerator {
    rng: StdRng,
}

impl PairGenerator {
    /// Creates a generator seeded from the operating system.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a generator that replays the same sequence for `seed`.
    ///
    /// UUID prefixes come from the same stream, so a seeded run reproduces
    /// its fixtures exactly.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generates one pair.
    pub fn pair(&mut self) -> QuestionAnswerPair {
        let question = format!(
            "{}: {} with {}?",
            self.uuid(),
            self.catch_phrase(),
            self.buzz_phrase()
        );
        let answer = format!("{}: Yes! {}", self.uuid(), self.hacker_phrase());

        QuestionAnswerPair { question, answer }
    }

    /// Generates `count` pairs.
    pub fn pairs(&mut self, count: usize) -> Vec<QuestionAnswerPair> {
        (0..count).map(|_| self.pair()).collect()
    }

    /// Generates [`DEFAULT_PAIR_COUNT`] pairs.
    pub fn pairs_default(&mut self) -> Vec<QuestionAnswerPair> {
        self.pairs(DEFAULT_PAIR_COUNT)
    }

    /// Builds a string of exactly `target_length` bytes that starts with
    /// [`SPECIAL_CHARS`] and pads the rest with random alphanumerics.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `target_length` cannot fit the whole
    /// punctuation alphabet.
    pub fn boundary_string(&mut self, target_length: usize) -> Result<String> {
        if target_length < SPECIAL_CHARS.len() {
            return Err(UatError::InvalidArgument(format!(
                "target length {target_length} cannot fit the {} mandatory special characters",
                SPECIAL_CHARS.len()
            )));
        }

        let filler: String = (&mut self.rng)
            .sample_iter(&Alphanumeric)
            .take(target_length - SPECIAL_CHARS.len())
            .map(char::from)
            .collect();

        Ok(format!("{SPECIAL_CHARS}{filler}"))
    }

    fn uuid(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        uuid::Builder::from_random_bytes(bytes).into_uuid()
    }

    fn catch_phrase(&mut self) -> String {
        format!(
            "{} {} {}",
            self.pick(CATCH_ADJECTIVES),
            self.pick(CATCH_DESCRIPTORS),
            self.pick(CATCH_NOUNS)
        )
    }

    fn buzz_phrase(&mut self) -> String {
        format!(
            "{} {} {}",
            self.pick(BUZZ_VERBS),
            self.pick(BUZZ_ADJECTIVES),
            self.pick(BUZZ_NOUNS)
        )
    }

    fn hacker_phrase(&mut self) -> String {
        format!(
            "Try to {} the {} {}, maybe it will {} the {} {}!",
            self.pick(HACKER_VERBS),
            self.pick(HACKER_ADJECTIVES),
            self.pick(HACKER_NOUNS),
            self.pick(HACKER_VERBS),
            self.pick(HACKER_ADJECTIVES),
            self.pick(HACKER_NOUNS)
        )
    }

    fn pick(&mut self, words: &'static [&'static str]) -> &'static str {
        words[self.rng.gen_range(0..words.len())]
    }
}

impl Default for PairGenerator {
    fn default() -> Self {
        Self::new()
    }
}
