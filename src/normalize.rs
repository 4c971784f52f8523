/// Distance between a full-width Latin letter or digit and its ASCII form.
const FULL_WIDTH_OFFSET: u32 = 0xFEE0;

/// Folds full-width `Ａ-Ｚ`, `ａ-ｚ` and `０-９` to their half-width forms.
///
/// Everything else, including full-width punctuation and spaces, is left alone.
pub fn to_half_width(s: &str) -> String {
    s.chars().map(fold_char).collect()
}

fn fold_char(c: char) -> char {
    match c {
        'Ａ'..='Ｚ' | 'ａ'..='ｚ' | '０'..='９' => {
            char::from_u32(c as u32 - FULL_WIDTH_OFFSET).unwrap_or(c)
        }
        _ => c,
    }
}
