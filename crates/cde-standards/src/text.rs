//! Lookup-key normalization shared by the tag, path and label matchers.

/// Lower-cases `value`, collapses every run of non-alphanumeric characters
/// into a single space and trims the ends.
///
/// `"Body-Mass  Index (BMI)"` becomes `"body mass index bmi"`.
pub fn normalize_key(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut pending_space = false;
    for ch in value.chars() {
        if ch.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.extend(ch.to_lowercase());
        } else {
            pending_space = true;
        }
    }
    out
}

/// Normalized words of `value`, in order.
pub fn tokens(value: &str) -> Vec<String> {
    normalize_key(value)
        .split(' ')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
