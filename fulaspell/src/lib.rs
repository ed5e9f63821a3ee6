/*! Spell-checking and correction driven by a frequency-weighted corpus.

Builds a vocabulary from a corpus of correctly spelled text, then ranks
correction candidates that are one or two single-character edits away from
the input by their corpus probability. A weighted minimum edit distance is
available for scoring arbitrary string pairs.

All edits operate on grapheme clusters, so letters with diacritics such as
`ɓ`, `ɗ`, `ŋ`, `ñ` and `ƴ` are never split.

# Usage examples

```
use std::sync::Arc;

use fulaspell::alphabet::Alphabet;
use fulaspell::speller::{ProbabilitySpeller, Speller};
use fulaspell::vocabulary::VocabularyModel;

let model = VocabularyModel::from_text("mbaroodi mbaroodi pucci puccu");
let speller = ProbabilitySpeller::new(model, Alphabet::default());

let suggestions = Arc::clone(&speller).suggest("mbarodi").unwrap();
assert_eq!(suggestions[0].value(), "mbaroodi");

let distance = fulaspell::distance::min_edit_distance(
    "guto",
    "gite",
    &fulaspell::distance::EditCosts::default(),
)
.unwrap();
assert_eq!(distance.distance(), 4);
```

Further examples of how to use the library can be found in `fulaspell-bin`
in the same repository.
*/

#![warn(missing_docs)]
pub mod alphabet;
pub mod candidates;
pub mod distance;
pub mod edits;
pub mod speller;
pub mod tokenizer;
pub mod vocabulary;

pub(crate) mod constants;
