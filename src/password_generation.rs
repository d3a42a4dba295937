//! Utilities for generating passwords.

use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng};

use crate::charset::build_pool;
use crate::request::GenerationRequest;
use crate::{Error, ErrorRepr, Secret};

/// Generate a password by randomly sampling the given alphabet, with replacement.
///
/// Every position is drawn independently, so characters (including adjacent ones) may repeat.
///
/// Note that `rand`'s underlying uniform sampler does the right thing to prevent bias: if it can't
/// generate a value that is within the given range (or really, a multiple of the range), it
/// re-samples.
pub fn generate_random_password<R>(
    rng: &mut R,
    alphabet: &[char],
    len: usize,
) -> Result<Secret, Error>
where
    R: Rng + CryptoRng,
{
    if alphabet.is_empty() {
        return Err(ErrorRepr::EmptyCharacterPool.into());
    }
    let mut secret = Secret(String::with_capacity(len));
    for _ in 0..len {
        let ch = alphabet.choose(rng).ok_or(ErrorRepr::EmptyCharacterPool)?;
        secret.0.push(*ch);
    }
    Ok(secret)
}

/// Fulfil a validated request, drawing from the pool of its enabled classes.
pub fn generate<R>(rng: &mut R, request: &GenerationRequest) -> Result<Secret, Error>
where
    R: Rng + CryptoRng,
{
    let pool = build_pool(request.classes());
    if pool.is_empty() {
        log::warn!("no character class enabled; refusing to generate");
        return Err(ErrorRepr::EmptyCharacterPool.into());
    }
    log::debug!(
        "generating {} characters from a pool of {}",
        request.length(),
        pool.len()
    );
    generate_random_password(rng, &pool, request.length())
}

/// [`generate`], using the thread-local generator.
pub fn generate_password(request: &GenerationRequest) -> Result<Secret, Error> {
    generate(&mut rand::thread_rng(), request)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::charset::{CharacterClass, ClassSelection};
    use crate::ErrorKind;

    #[test]
    fn length_matches_request() {
        let mut rng = StdRng::seed_from_u64(7);
        for length in 8..=20 {
            let request = GenerationRequest::new(length, ClassSelection::all()).unwrap();
            assert_eq!(generate(&mut rng, &request).unwrap().len(), length);
        }
    }

    #[test]
    fn characters_come_from_enabled_classes() {
        let mut rng = StdRng::seed_from_u64(11);
        let classes = ClassSelection::none()
            .with(CharacterClass::Uppercase)
            .with(CharacterClass::Symbols);
        let pool = build_pool(&classes);
        let request = GenerationRequest::new(20, classes).unwrap();
        for _ in 0..200 {
            let password = generate(&mut rng, &request).unwrap();
            assert!(password.as_str().chars().all(|ch| pool.contains(&ch)));
        }
    }

    #[test]
    fn empty_pool_is_an_error() {
        let mut rng = StdRng::seed_from_u64(0);
        let request = GenerationRequest::new(12, ClassSelection::none()).unwrap();
        let err = generate(&mut rng, &request).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyCharacterPool);

        let err = generate_random_password(&mut rng, &[], 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyCharacterPool);
    }

    #[test]
    fn single_character_alphabet() {
        let mut rng = StdRng::seed_from_u64(3);
        let password = generate_random_password(&mut rng, &['x'], 9).unwrap();
        assert_eq!(password.as_str(), "xxxxxxxxx");
    }

    #[test]
    fn thread_rng_convenience() {
        let request = GenerationRequest::new(16, ClassSelection::default()).unwrap();
        let password = generate_password(&request).unwrap();
        assert_eq!(password.len(), 16);
        assert!(password.as_str().chars().all(|ch| ch.is_ascii_lowercase()));
    }
}
