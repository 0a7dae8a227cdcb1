//! Flavour lines shown next to each answer category.

use rand::seq::SliceRandom;
use rand::Rng;
use rose_common::Label;

const TOO_FAR_AWAY: &[&str] = &[
    "Way off! Think completely differently!",
    "Not even close! Change your approach!",
    "Miles away! Try another angle!",
    "Totally off track! Rethink this!",
    "Nope, you're in the wrong galaxy!",
];

const NO: &[&str] = &[
    "Nope, that's not it!",
    "No, try a different direction!",
    "Not quite! Think again...",
    "No, but good question!",
    "That's a no! Keep guessing!",
];

const DONT_KNOW: &[&str] = &[
    "Hmm, that's a tricky one...",
    "Not sure about that! Try something else.",
    "Hard to say... ask something different!",
    "That's debatable... keep exploring!",
    "I'm on the fence with that one!",
];

const CLOSE: &[&str] = &[
    "Getting warmer! You're so close!",
    "Almost! You're in the right neighborhood!",
    "Very close! Just a little more...",
    "Hot! You're nearly there!",
    "So close I can feel it!",
];

const YES: &[&str] = &[
    "Yes! You're on the right track!",
    "That's correct! Keep going!",
    "Absolutely! You're getting closer!",
    "Yes indeed! Smart question!",
    "Right on! You're narrowing it down!",
];

pub fn lines(label: Label) -> &'static [&'static str] {
    match label {
        Label::TooFarAway => TOO_FAR_AWAY,
        Label::No => NO,
        Label::DontKnow => DONT_KNOW,
        Label::Close => CLOSE,
        Label::Yes => YES,
    }
}

/// A random flavour line for `label`.
pub fn pick<R: Rng + ?Sized>(label: Label, rng: &mut R) -> &'static str {
    lines(label).choose(rng).copied().unwrap_or("Interesting...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_five_lines_per_label() {
        for label in Label::ALL {
            assert_eq!(lines(label).len(), 5, "{}", label);
        }
    }

    #[test]
    fn test_pick_comes_from_label() {
        let mut rng = StdRng::seed_from_u64(3);
        for label in Label::ALL {
            for _ in 0..20 {
                assert!(lines(label).contains(&pick(label, &mut rng)));
            }
        }
    }
}
