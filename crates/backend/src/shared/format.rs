/// Форматирует размер ответа: байты с разделителями тысяч (точками),
/// начиная с мегабайта в MB с одним знаком
///
/// # Примеры
/// ```ignore
/// assert_eq!(format_size(1234), "1.234");
/// assert_eq!(format_size(5_500_000), "5.2 MB");
/// ```
pub fn format_size(bytes: usize) -> String {
    const MB: usize = 1024 * 1024;
    if bytes >= MB {
        return format!("{:.1} MB", bytes as f64 / MB as f64);
    }
    let s = bytes.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0");
        assert_eq!(format_size(999), "999");
        assert_eq!(format_size(1000), "1.000");
        assert_eq!(format_size(1234567 / 2), "617.283");
        assert_eq!(format_size(5_500_000), "5.2 MB");
    }
}
