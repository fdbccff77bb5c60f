//! Affirmations shown under the box, one per breathing cycle.

use rand::Rng;

pub const AFFIRMATIONS: &[&str] = &[
    "Take a second to just be here.",
    "Let go of all your worries and stress.",
    "The code will still be there when you're done.",
    "Just take a moment for yourself.",
    "You deserve a moment of peace and calm.",
    "Breathe in, breathe out, and let go of all your thoughts.",
    "You are not alone in this, and you are strong.",
    "Take a moment to breathe, and let go of all your worries.",
    "You are capable of handling whatever comes your way.",
    "You are more than your productivity",
    "Your brain is a muscle, and it needs rest too.",
    "Remember, you are not defined by your to-do list.",
    "You are more than just a collection of tasks and deadlines.",
    "You are doing a great job.",
    "It's ok to git checkout of work for a moment.",
    "Sometimes a system needs a RESTART. So do you.",
];

/// Uniform pick from `messages`. Empty tables yield an empty string.
pub fn pick<R: Rng + ?Sized>(messages: &[&'static str], rng: &mut R) -> &'static str {
    if messages.is_empty() {
        return "";
    }
    messages[rng.gen_range(0..messages.len())]
}
