use crate::settings::Difficulty;

pub const EASY_WORDS: &[&str] = &["asd", "jkl", "qwe", "zxc", "fgh", "uio"];

pub const MEDIUM_WORDS: &[&str] = &["crate", "trait", "macro", "tokio", "serde", "regex", "clone", "match"];

pub const HARD_WORDS: &[&str] = &[
    "borrowchecker",
    "typestate",
    "smartpointer",
    "matchguard",
    "hashmap",
    "refcell",
    "lifetimebound",
    "deadlock",
];

pub fn pool(difficulty: Difficulty) -> &'static [&'static str]
{
    match difficulty {
        Difficulty::Easy => EASY_WORDS,
        Difficulty::Medium => MEDIUM_WORDS,
        Difficulty::Hard => HARD_WORDS,
    }
}
