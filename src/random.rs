//! Random timecode generation for tests and fuzzing.

use rand::Rng;

/// Produce a random valid `HH:MM:SS:FF` timecode string.
///
/// The frames field stays within 0-23 so the output is meaningful at every
/// supported rate, not just the fast ones.
#[must_use]
pub fn random_timecode() -> String {
    let mut rng = rand::thread_rng();
    format!(
        "{:02}:{:02}:{:02}:{:02}",
        rng.gen_range(0..24),
        rng.gen_range(0..60),
        rng.gen_range(0..60),
        rng.gen_range(0..24),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::is_timecode;

    #[test]
    fn test_random_timecode_is_always_valid() {
        for _ in 0..200 {
            let tc = random_timecode();
            assert!(is_timecode(&tc), "generated invalid timecode: {tc}");
        }
    }
}
