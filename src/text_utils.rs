use chrono::NaiveDate;

/// Long en-US date, e.g. `January 2, 2025`.
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

pub fn format_iso_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// URL-safe slug from a post title: ASCII only, lowercase, words joined by `-`.
pub fn slugify(title: &str) -> String {
    let ascii = unidecode::unidecode(title);

    let mut slug = String::with_capacity(ascii.len());
    let mut prev_dash = true;
    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            prev_dash = false;
        } else if !prev_dash {
            slug.push('-');
            prev_dash = true;
        }
    }

    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}
