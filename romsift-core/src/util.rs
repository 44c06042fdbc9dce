/// Split a file name into stem and extension (extension includes the dot).
///
/// Release names often contain periods (`Super Mario Bros.`, `Dr. Mario`), so
/// only a trailing run of 1-5 alphanumeric characters after the last period
/// counts as an extension. Names without one return an empty extension.
pub fn split_extension(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(pos) => {
            let ext = &file_name[pos + 1..];
            if pos > 0
                && (1..=5).contains(&ext.len())
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
            {
                (&file_name[..pos], &file_name[pos..])
            } else {
                (file_name, "")
            }
        }
        None => (file_name, ""),
    }
}

/// Return the stem of a file name (see [`split_extension`]).
pub fn file_stem(file_name: &str) -> &str {
    split_extension(file_name).0
}

/// Whether the file name carries a `.zip` extension (any case).
pub fn is_zip_name(file_name: &str) -> bool {
    split_extension(file_name).1.eq_ignore_ascii_case(".zip")
}

#[cfg(test)]
#[path = "tests/util_tests.rs"]
mod tests;
