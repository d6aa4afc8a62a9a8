use rand::{
    distributions::{Distribution, Uniform},
    Rng,
};

const JOIN_CODE_LENGTH: usize = 7;

struct UpperAlphanumeric;

impl Distribution<char> for UpperAlphanumeric {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> char {
        const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

        let range = Uniform::new(0, CHARSET.len());
        CHARSET[range.sample(rng)] as char
    }
}

pub fn generate_join_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..JOIN_CODE_LENGTH)
        .map(|_| rng.sample(UpperAlphanumeric))
        .collect()
}
