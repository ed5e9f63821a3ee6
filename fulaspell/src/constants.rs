/// Letters of the Fula (Pulaar) orthography, hooked consonants included.
pub const FULA_LETTERS: &str = "abɓcdɗefghijklmnŋñoprstuwyƴz";

pub const DEFAULT_N_BEST: usize = 10;
pub const DEFAULT_MAX_EDIT_ONE_LEN: usize = 64;
pub const DEFAULT_MAX_EDIT_TWO_LEN: usize = 32;

pub const DEFAULT_INSERT_COST: u64 = 1;
pub const DEFAULT_DELETE_COST: u64 = 1;
pub const DEFAULT_REPLACE_COST: u64 = 2;
