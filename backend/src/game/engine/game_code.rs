use rand::Rng;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const CODE_LENGTH: usize = 4;

pub fn generate_game_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LENGTH)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

pub fn generate_unique_game_code<F>(exists: F) -> String
where
    F: Fn(&str) -> bool,
{
    loop {
        let code = generate_game_code();
        if !exists(&code) {
            return code;
        }
    }
}

/// Canonical form of a code typed by a player
pub fn normalize_game_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}
