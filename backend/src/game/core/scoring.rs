use std::collections::{HashMap, HashSet};

/// Points for a single accepted word
pub fn points_for(word: &str) -> u32 {
    match word.chars().count() {
        0..=2 => 0,
        3 => 10,
        4 => 15,
        _ => 20,
    }
}

/// Score a finished round. Takes each player's accepted words and returns their
/// round scores in the same order. A word claimed by more than one player
/// earns nothing for anyone.
pub fn resolve_round(submissions: &[&[String]]) -> Vec<u32> {
    let mut claims: HashMap<&str, usize> = HashMap::new();
    for words in submissions {
        let distinct: HashSet<&str> = words.iter().map(String::as_str).collect();
        for word in distinct {
            *claims.entry(word).or_default() += 1;
        }
    }

    submissions
        .iter()
        .map(|words| {
            words
                .iter()
                .map(String::as_str)
                .collect::<HashSet<_>>()
                .into_iter()
                .filter(|word| claims.get(word) == Some(&1))
                .map(points_for)
                .sum()
        })
        .collect()
}
