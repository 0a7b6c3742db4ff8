//! Scrambled board generation for sliding-tile puzzles.
//!
//! Boards are produced by a random walk of the empty cell away from the goal,
//! so every generated board is solvable. Generation is deterministic for a
//! given [`ScrambleSeed`], board size and walk length.
//!
//! # Examples
//!
//! ```
//! use slidetile_generator::{ScrambleGenerator, ScrambleSeed};
//!
//! let generator = ScrambleGenerator::new(4, 80);
//! let scramble = generator.generate();
//! assert!(scramble.board.is_solvable());
//!
//! // The same seed reproduces the same board.
//! let again = generator.generate_with_seed(scramble.seed);
//! assert_eq!(again.board, scramble.board);
//!
//! // Seeds round-trip through their hex form.
//! let seed: ScrambleSeed = scramble.seed.to_string().parse()?;
//! assert_eq!(seed, scramble.seed);
//! # Ok::<(), slidetile_generator::ParseSeedError>(())
//! ```

use std::{fmt, str::FromStr};

use rand::{SeedableRng as _, seq::IndexedRandom as _};
use rand_pcg::Pcg64;
use sha2::{Digest as _, Sha256};
use slidetile_core::{BoardState, Direction};
use tinyvec::ArrayVec;

/// A 32-byte seed, written as 64 hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScrambleSeed([u8; 32]);

impl ScrambleSeed {
    /// Creates a seed from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Creates a seed from the system's random source.
    #[must_use]
    pub fn random() -> Self {
        Self(rand::random())
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for ScrambleSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Errors from parsing a [`ScrambleSeed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSeedError {
    /// The string is not 64 characters long.
    #[display("seed must be 64 hex digits, got {len} characters")]
    InvalidLength {
        /// Length of the input in characters.
        len: usize,
    },
    /// The string contains a character that is not a hex digit.
    #[display("seed contains a non-hex character at {index}")]
    InvalidDigit {
        /// Byte offset of the offending character.
        index: usize,
    },
}

impl FromStr for ScrambleSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != 64 {
            return Err(ParseSeedError::InvalidLength {
                len: s.chars().count(),
            });
        }
        let mut bytes = [0; 32];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let index = i * 2;
            let pair = s
                .get(index..index + 2)
                .ok_or(ParseSeedError::InvalidDigit { index })?;
            if !pair.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(ParseSeedError::InvalidDigit { index });
            }
            *byte = u8::from_str_radix(pair, 16)
                .map_err(|_| ParseSeedError::InvalidDigit { index })?;
        }
        Ok(Self(bytes))
    }
}

/// A generated board with the seed that reproduces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedScramble {
    /// The scrambled board.
    pub board: BoardState,
    /// The seed passed to the generator.
    pub seed: ScrambleSeed,
}

/// Scrambles boards by walking the empty cell away from the goal.
///
/// The walk never immediately undoes its previous move.
#[derive(Debug, Clone, Copy)]
pub struct ScrambleGenerator {
    size: usize,
    moves: usize,
}

impl ScrambleGenerator {
    /// Creates a generator for `size`×`size` boards and walks of `moves` steps.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero or larger than [`slidetile_core::MAX_SIZE`].
    #[must_use]
    pub fn new(size: usize, moves: usize) -> Self {
        assert!(
            (1..=slidetile_core::MAX_SIZE).contains(&size),
            "invalid board size: {size}"
        );
        Self { size, moves }
    }

    /// Returns the walk length used by the command-line harness for `size`.
    #[must_use]
    pub fn default_moves(size: usize) -> usize {
        (size * size * 3).max(60)
    }

    /// Returns the board size.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the walk length.
    #[must_use]
    pub fn moves(&self) -> usize {
        self.moves
    }

    /// Generates a board from a fresh random seed.
    #[must_use]
    pub fn generate(&self) -> GeneratedScramble {
        self.generate_with_seed(ScrambleSeed::random())
    }

    /// Generates the board determined by `seed`.
    #[must_use]
    pub fn generate_with_seed(&self, seed: ScrambleSeed) -> GeneratedScramble {
        let mut rng = Pcg64::from_seed(self.rng_seed(seed));
        let mut board = BoardState::goal(self.size);
        let mut last: Option<Direction> = None;

        for _ in 0..self.moves {
            let options = board
                .legal_moves()
                .into_iter()
                .filter(|&dir| Some(dir.opposite()) != last)
                .collect::<ArrayVec<[Direction; 4]>>();
            let Some(&dir) = options.choose(&mut rng) else {
                break;
            };
            let Some(next) = board.apply_move(dir) else {
                break;
            };
            board = next;
            last = Some(dir);
        }

        GeneratedScramble { board, seed }
    }

    /// Derives the RNG seed from the user seed and the walk parameters.
    fn rng_seed(&self, seed: ScrambleSeed) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(b"slidetile-scramble");
        hasher.update(seed.as_bytes());
        hasher.update((self.size as u64).to_le_bytes());
        hasher.update((self.moves as u64).to_le_bytes());
        hasher.finalize().into()
    }
}
