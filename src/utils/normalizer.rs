use unicode_properties::{GeneralCategoryGroup, UnicodeGeneralCategory};

/// Is `c` in one of the Unicode punctuation categories (Pc, Pd, Ps, Pe, Pi, Pf, Po)
#[inline]
pub fn is_punctuation(c: char) -> bool {
    c.general_category_group() == GeneralCategoryGroup::Punctuation
}

/// Remove punctuation and lowercase a document.
///
/// Retained characters keep their relative order; whitespace is untouched so
/// the result can be tokenized the same way as the input.
///
/// # Arguments
/// * `text` - raw document text
///
/// # Returns
/// * `String` - normalized text
///
/// # Examples
/// ```
/// use tf_idf_huffman::normalize;
/// assert_eq!(normalize("Hello, World!"), "hello world");
/// ```
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars().filter(|c| !is_punctuation(*c)) {
        match c {
            // only char whose full lowercase mapping is longer than one char ("i\u{307}");
            // use the simple mapping so every char lowercases to exactly one char
            '\u{130}' => out.push('i'),
            _ => out.extend(c.to_lowercase()),
        }
    }
    out
}
