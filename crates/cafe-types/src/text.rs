//! Text normalization

/// Title-case a string: the first letter of every run of letters is
/// uppercased and the rest lowercased. Anything that is not a letter
/// (spaces, digits, apostrophes, hyphens) starts a new run.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_word = false;

    for c in input.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}
