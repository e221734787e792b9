use sha2::{Digest, Sha256};

/// Number of words rendered for one verification string.
pub const WORD_COUNT: usize = 5;

/// Ordered list of short English words used to render the verification
/// string. The index-to-word mapping is shared by both peers, so entries are
/// never reordered; a few historical duplicates are kept for that reason.
pub const WORDS: [&str; 260] = [
    "apple", "banana", "cherry", "dragon", "eagle",
    "falcon", "garden", "harbor", "island", "jungle",
    "kitten", "lemon", "mango", "nectar", "orange",
    "panda", "quartz", "rabbit", "salmon", "tiger",
    "umbrella", "violet", "walnut", "xenon", "yellow",
    "zebra", "anchor", "bridge", "castle", "delta",
    "echo", "forest", "guitar", "hammer", "ivory",
    "jacket", "kernel", "laptop", "marble", "needle",
    "ocean", "pencil", "queen", "river", "sunset",
    "temple", "unity", "valley", "window", "xerox",
    "yacht", "zenith", "alpha", "beta", "gamma",
    "delta", "epsilon", "zeta", "theta", "kappa",
    "lambda", "sigma", "omega", "phoenix", "crypto",
    "cipher", "binary", "matrix", "vector", "prism",
    "quantum", "plasma", "nebula", "comet", "orbit",
    "lunar", "solar", "stellar", "cosmic", "galaxy",
    "planet", "meteor", "aurora", "vertex", "nexus",
    "apex", "summit", "zenith", "peak", "crown",
    "royal", "noble", "brave", "swift", "bold",
    "calm", "pure", "wise", "true", "free",
    "light", "spark", "flame", "blaze", "glow",
    "shine", "gleam", "flash", "beam", "ray",
    "wave", "tide", "stream", "brook", "creek",
    "lake", "pond", "pool", "spring", "well",
    "rain", "snow", "frost", "mist", "cloud",
    "storm", "wind", "breeze", "gust", "draft",
    "dawn", "dusk", "noon", "night", "star",
    "moon", "sun", "sky", "earth", "stone",
    "rock", "sand", "dust", "clay", "soil",
    "tree", "leaf", "root", "bark", "branch",
    "seed", "bloom", "petal", "thorn", "vine",
    "grass", "fern", "moss", "reed", "kelp",
    "coral", "shell", "pearl", "jade", "ruby",
    "gold", "silver", "bronze", "copper", "iron",
    "steel", "zinc", "lead", "tin", "brass",
    "crystal", "diamond", "emerald", "topaz", "opal",
    "amber", "onyx", "obsidian", "granite", "basalt",
    "maple", "willow", "cedar", "pine", "birch",
    "oak", "elm", "ash", "beech", "palm",
    "rose", "lily", "tulip", "daisy", "lotus",
    "orchid", "iris", "peony", "poppy", "clover",
    "mint", "basil", "sage", "thyme", "dill",
    "pepper", "ginger", "cumin", "curry", "chili",
    "honey", "sugar", "cream", "butter", "cheese",
    "bread", "cake", "cookie", "candy", "jelly",
    "coffee", "cocoa", "vanilla", "caramel", "maple",
    "north", "south", "east", "west", "center",
    "left", "right", "front", "back", "middle",
    "first", "second", "third", "fourth", "fifth",
    "one", "two", "three", "four", "five",
    "six", "seven", "eight", "nine", "ten",
    "red", "blue", "green", "white", "black",
];

/// Derives the five verification words from a 32-byte key.
///
/// Hashes the key, then reduces consecutive 16-bit big-endian chunks of the
/// digest modulo the list length. Both peers feed in the same base key, so an
/// untampered handshake yields identical words on both ends.
pub fn verification_words(key: &[u8; 32]) -> [&'static str; WORD_COUNT] {
    let hash = Sha256::digest(key);

    let mut words = [""; WORD_COUNT];
    for (i, word) in words.iter_mut().enumerate() {
        let index = u16::from_be_bytes([hash[2 * i], hash[2 * i + 1]]) as usize % WORDS.len();
        *word = WORDS[index];
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_key_same_words() {
        let key = [13u8; 32];
        assert_eq!(verification_words(&key), verification_words(&key));
    }

    #[test]
    fn test_words_come_from_the_list() {
        for seed in 0..8u8 {
            let words = verification_words(&[seed; 32]);
            for word in words {
                assert!(WORDS.contains(&word), "{word} not in the wordlist");
            }
        }
    }

    #[test]
    fn test_words_are_lowercase_ascii() {
        for word in WORDS {
            assert!(!word.is_empty());
            assert!(word.chars().all(|c| c.is_ascii_lowercase()));
        }
    }
}
