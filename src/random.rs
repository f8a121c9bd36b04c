//! Random test-data helpers backed by the runner's seedable PRNG.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::calls::record_call;
use crate::runner::Runner;

const TOKEN_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const TOKEN_LEN: usize = 6;

impl Runner {
    /// An integer in `0..=100`.
    pub fn random_number(&mut self) -> u32 {
        record_call("random_number");
        self.rng.gen_range(0..=100)
    }

    /// A short lowercase base-36 token.
    pub fn random_token(&mut self) -> String {
        record_call("random_token");
        (0..TOKEN_LEN)
            .map(|_| TOKEN_ALPHABET[self.rng.gen_range(0..TOKEN_ALPHABET.len())] as char)
            .collect()
    }

    /// A shuffled copy of `items` (Fisher-Yates).
    pub fn randomize<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        record_call("randomize");
        let mut shuffled = items.to_vec();
        shuffled.shuffle(&mut self.rng);
        shuffled
    }

    /// One element of `items`, or `None` when it is empty.
    pub fn sample<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        record_call("sample");
        items.choose(&mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::RunnerConfig;
    use crate::output::NullConsole;
    use crate::runner::Runner;

    fn seeded(seed: u64) -> Runner {
        Runner::with_console(RunnerConfig::default().with_seed(seed), Box::new(NullConsole))
    }

    #[test]
    fn numbers_stay_in_range() {
        let mut runner = seeded(1);
        for _ in 0..500 {
            assert!(runner.random_number() <= 100);
        }
    }

    #[test]
    fn tokens_are_base36() {
        let mut runner = seeded(2);
        let token = runner.random_token();
        assert_eq!(token.len(), 6);
        assert!(token.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn same_seed_reproduces_sequence() {
        let mut a = seeded(99);
        let mut b = seeded(99);
        let xs: Vec<u32> = (0..10).map(|_| a.random_number()).collect();
        let ys: Vec<u32> = (0..10).map(|_| b.random_number()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn randomize_is_a_permutation() {
        let mut runner = seeded(3);
        let input = vec![5, 1, 4, 1, 9];
        let mut shuffled = runner.randomize(&input);
        assert_eq!(shuffled.len(), input.len());
        shuffled.sort();
        let mut sorted = input.clone();
        sorted.sort();
        assert_eq!(shuffled, sorted);
    }

    #[test]
    fn randomize_reaches_every_position() {
        let mut runner = seeded(4);
        let input = ['a', 'b', 'c'];
        let mut seen = [[false; 3]; 3];
        for _ in 0..600 {
            for (pos, item) in runner.randomize(&input).iter().enumerate() {
                let idx = input.iter().position(|c| c == item).unwrap();
                seen[idx][pos] = true;
            }
        }
        assert!(seen.iter().all(|row| row.iter().all(|&hit| hit)));
    }

    #[test]
    fn sample_picks_a_member() {
        let mut runner = seeded(5);
        let input = [10, 20, 30];
        for _ in 0..50 {
            let picked = runner.sample(&input).unwrap();
            assert!(input.contains(picked));
        }
        let empty: [i32; 0] = [];
        assert!(runner.sample(&empty).is_none());
    }
}
