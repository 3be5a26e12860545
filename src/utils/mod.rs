pub mod csv_export;
pub mod ip;

pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    let chars = b"abcdefghijklmnopqrstuvwxyz0123456789";

    iter::repeat_with(|| chars[rand::random_range(0..chars.len())] as char)
        .take(length)
        .collect()
}

/// Lowercase, collapse non-alphanumeric runs to `-`, trim leading/trailing `-`
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut last_dash = true; // suppress a leading dash

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }

    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Prelanding key: slugified headline plus a short random suffix.
/// The suffix keeps regenerated keys from colliding on identical headlines.
pub fn generate_prelanding_key(headline: &str) -> String {
    let slug = slugify(headline);
    let suffix = generate_random_code(6);
    if slug.is_empty() {
        suffix
    } else {
        format!("{}-{}", slug, suffix)
    }
}
