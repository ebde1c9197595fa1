use rand::Rng;
use rand::seq::SliceRandom;

pub const VOWELS: &[u8] = b"AEIOU";
pub const CONSONANTS: &[u8] = b"BCDFGHJKLMNPQRSTVWXYZ";

pub const VOWEL_COUNT: usize = 8;
pub const CONSONANT_COUNT: usize = 12;
pub const POOL_SIZE: usize = VOWEL_COUNT + CONSONANT_COUNT;

fn pick<R: Rng + ?Sized>(rng: &mut R, charset: &[u8]) -> char {
    charset[rng.random_range(0..charset.len())] as char
}

/// Draw a fresh letter pool for a round: 8 vowels and 12 consonants, uniformly
/// shuffled.
pub fn generate_letters<R: Rng + ?Sized>(rng: &mut R) -> Vec<char> {
    let mut letters: Vec<char> = (0..VOWEL_COUNT).map(|_| pick(rng, VOWELS)).collect();
    letters.extend((0..CONSONANT_COUNT).map(|_| pick(rng, CONSONANTS)));
    letters.shuffle(rng);
    letters
}
